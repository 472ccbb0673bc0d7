//! `jobscope wordcloud <keyword>`: write the word-cloud term file.

use crate::cli::output::{self, Mode, Styled};
use anyhow::{bail, Result};
use std::path::PathBuf;

/// Run the wordcloud command.
pub async fn run(keyword: &str, db: Option<PathBuf>) -> Result<()> {
    let state = crate::cli::open_state(db)?;
    let path = match state.render_word_cloud(keyword) {
        Ok(path) => path,
        Err(jobscope::Error::EmptyTermStream) => {
            bail!("No data to build a word cloud for '{keyword}'. Run 'jobscope crawl {keyword}' first.")
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(text) = summary(output::mode(), keyword, &path) {
        println!("{text}");
    }
    Ok(())
}

/// What to print once the term file is written. Quiet mode prints nothing.
fn summary(mode: Mode, keyword: &str, path: &str) -> Option<String> {
    match mode {
        Mode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "keyword": keyword,
            "path": path,
        }))
        .ok(),
        Mode::Quiet => None,
        Mode::Human => Some(format!(
            "  {} Word cloud terms written to {path}",
            Styled::new().ok_sym()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_prints_nothing() {
        assert_eq!(summary(Mode::Quiet, "Go", "out/Go_wordcloud.json"), None);
    }

    #[test]
    fn test_json_and_human_summaries() {
        let json = summary(Mode::Json, "Go", "out/Go_wordcloud.json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["path"], "out/Go_wordcloud.json");
        assert_eq!(value["keyword"], "Go");

        let human = summary(Mode::Human, "Go", "out/Go_wordcloud.json").unwrap();
        assert!(human.ends_with("written to out/Go_wordcloud.json"));
    }
}
