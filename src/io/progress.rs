//! Terminal progress bar for an autoplay session

use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};

use crate::io::configuration::PROGRESS_BAR_WIDTH;

static SESSION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Marbles: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Spawn counter with a running score and receptor tally
pub struct ProgressDisplay {
    bar: ProgressBar,
}

impl ProgressDisplay {
    /// Create a bar sized for `spawns` marbles
    pub fn new(spawns: usize) -> Self {
        let bar = ProgressBar::new(spawns as u64);
        bar.set_style(SESSION_STYLE.clone());
        Self { bar }
    }

    /// Report the marbles spawned so far and the board state
    pub fn update(&self, spawned: usize, score: i64, unmarked: usize) {
        self.bar.set_position(spawned as u64);
        self.bar
            .set_message(format!("score {score}, {unmarked} receptors left"));
    }

    /// Leave the bar on screen with a closing message
    pub fn finish(&self, message: String) {
        self.bar.finish_with_message(message);
    }
}
