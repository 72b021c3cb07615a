//! Plain-text slide decks.
//!
//! Slides are separated by lines consisting only of `---`. The first line of a
//! slide starting with `# ` becomes its title and is not repeated in the body.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

/// Text of a single slide
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideContent {
    pub title: Option<String>,
    pub lines: Vec<String>,
}

impl SlideContent {
    fn from_lines(raw: &[&str]) -> Self {
        let mut title = None;
        let mut lines = Vec::with_capacity(raw.len());

        for line in raw {
            if title.is_none() {
                if let Some(heading) = line.strip_prefix("# ") {
                    title = Some(heading.trim().to_string());
                    continue;
                }
            }
            lines.push(line.to_string());
        }

        // Drop blank lines around the body
        while lines.first().is_some_and(|line| line.trim().is_empty()) {
            lines.remove(0);
        }
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }

        Self { title, lines }
    }

    fn is_empty(&self) -> bool {
        self.title.is_none() && self.lines.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Deck {
    path: Option<PathBuf>,
    slides: Vec<SlideContent>,
}

impl Deck {
    /// Split `text` into slides, skipping empty ones
    pub fn parse(text: &str) -> Self {
        let mut slides = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in text.lines() {
            if line.trim_end() == "---" {
                slides.push(SlideContent::from_lines(&current));
                current.clear();
            } else {
                current.push(line);
            }
        }
        slides.push(SlideContent::from_lines(&current));
        slides.retain(|slide| !slide.is_empty());

        Self { path: None, slides }
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read deck {}", path.display()))?;

        let mut deck = Self::parse(&text);
        deck.path = Some(path.to_path_buf());
        info!(path = %path.display(), slides = deck.slides.len(), "Deck loaded");
        Ok(deck)
    }

    /// Read the deck again from where it was loaded
    ///
    /// Decks without a backing file are returned unchanged.
    pub async fn reload(&self) -> Result<Self> {
        match &self.path {
            Some(path) => Self::load(path).await,
            None => Ok(self.clone()),
        }
    }

    /// Built-in deck shown when no file is given
    pub fn sample() -> Self {
        Self::parse(SAMPLE)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn slides(&self) -> &[SlideContent] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

const SAMPLE: &str = "\
# Slidereel

A carousel in your terminal.

l / h   next / previous
gg / G  first / last
1-9     jump to a slide
---
# Replay

m cycles what happens past the edges:

none    stop at the first and last slide
loop    wrap around without rewinding
rewind  jump back to the other end
---
# Direction

d flips between left-to-right and right-to-left.
---
# Visibility

x hides the current slide, u brings every slide back.
---
# Autoplay

Set [autoplay] interval_secs (or --set timedTransitionInterval=3)
and press <Space> to pause or resume.
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_separator() {
        let deck = Deck::parse("# One\nfirst\n---\n# Two\nsecond\nmore\n");

        assert_eq!(deck.len(), 2);
        assert_eq!(deck.slides()[0].title.as_deref(), Some("One"));
        assert_eq!(deck.slides()[0].lines, vec!["first"]);
        assert_eq!(deck.slides()[1].lines, vec!["second", "more"]);
    }

    #[test]
    fn test_only_first_heading_is_title() {
        let deck = Deck::parse("\n# Title\n\nbody\n# not a title\n\n");
        let slide = &deck.slides()[0];

        assert_eq!(slide.title.as_deref(), Some("Title"));
        assert_eq!(slide.lines, vec!["body", "# not a title"]);
    }

    #[test]
    fn test_empty_slides_are_skipped() {
        let deck = Deck::parse("---\n\n---\nonly\n---\n");
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.slides()[0].title, None);
    }

    #[test]
    fn test_separator_must_stand_alone() {
        let deck = Deck::parse("a\n----\nb\n --- \nc");
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.slides()[0].lines.len(), 5);
    }

    #[test]
    fn test_sample_deck() {
        let deck = Deck::sample();
        assert_eq!(deck.len(), 5);
        assert!(deck.path().is_none());
    }

    #[tokio::test]
    async fn test_load_and_reload() {
        let path = std::env::temp_dir().join(format!("slidereel-deck-{}.md", std::process::id()));
        tokio::fs::write(&path, "# A\n---\n# B\n").await.unwrap();

        let deck = Deck::load(&path).await.unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.path(), Some(path.as_path()));

        tokio::fs::write(&path, "# A\n---\n# B\n---\n# C\n").await.unwrap();
        let reloaded = deck.reload().await.unwrap();
        assert_eq!(reloaded.len(), 3);

        tokio::fs::remove_file(&path).await.unwrap();
        assert!(deck.reload().await.is_err());
    }
}
