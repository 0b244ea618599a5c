use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, LazyLock, Mutex};

use indicatif::{HumanBytes, MultiProgress, ProgressBar, ProgressStyle};
use railhead_fetch::{Progress, ProgressSink};

const PB_STYLE: &str = "{spinner:.blue} {prefix:>24.cyan.bold} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

const SPINNER_STYLE: &str =
    "{spinner:.blue} {prefix:>24.cyan.bold} [{elapsed_precise}] {bytes} ({bytes_per_sec})";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static BAR: LazyLock<Option<ProgressStyle>> = LazyLock::new(|| {
    ProgressStyle::with_template(PB_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK).progress_chars(PB_CHARS))
});

static SPINNER: LazyLock<Option<ProgressStyle>> = LazyLock::new(|| {
    ProgressStyle::with_template(SPINNER_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK))
});

/// The terminal's bar set; log output is routed through it so lines never
/// tear a bar that is being drawn.
pub static MULTI: LazyLock<MultiProgress> = LazyLock::new(MultiProgress::new);

/// Log writer that pauses the bars around each write.
pub struct SuspendingStderr;

impl io::Write for SuspendingStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        MULTI.suspend(|| io::stderr().write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        MULTI.suspend(|| io::stderr().flush())
    }
}

/// One bar per file, created on the first event for that file.
///
/// Transfers report from several tasks at once, so the bar table sits
/// behind a mutex.
pub struct TransferBars {
    multi: MultiProgress,
    bars:  Mutex<HashMap<String, ProgressBar>>,
}

impl TransferBars {
    pub fn new() -> Arc<Self> {
        Self::with_multi(MULTI.clone())
    }

    pub fn with_multi(multi: MultiProgress) -> Arc<Self> {
        Arc::new(Self {
            multi,
            bars: Mutex::default(),
        })
    }

    /// A sink feeding these bars.
    pub fn sink(self: &Arc<Self>) -> ProgressSink {
        let bars = Arc::clone(self);
        Arc::new(move |progress: &Progress| bars.update(progress))
    }

    fn update(&self, progress: &Progress) {
        let Ok(mut bars) = self.bars.lock() else {
            return;
        };
        let bar = bars
            .entry(progress.file_name.clone())
            .or_insert_with(|| self.multi.add(new_bar(progress)));
        bar.set_position(progress.bytes_downloaded);
    }

    /// Mark every bar finished, keeping the final state on screen.
    pub fn finish(&self) {
        if let Ok(bars) = self.bars.lock() {
            for bar in bars.values() {
                bar.finish();
            }
        }
    }

    /// One line per file with its final size.
    pub fn summary(&self) -> Vec<String> {
        self.totals()
            .into_iter()
            .map(|(name, bytes)| format!("  {name} {}", HumanBytes(bytes)))
            .collect()
    }

    /// Final byte count per file.
    pub fn totals(&self) -> Vec<(String, u64)> {
        let Ok(bars) = self.bars.lock() else {
            return Vec::new();
        };
        let mut totals: Vec<_> = bars
            .iter()
            .map(|(name, bar)| (name.clone(), bar.position()))
            .collect();
        totals.sort();
        totals
    }
}

fn new_bar(progress: &Progress) -> ProgressBar {
    let (bar, style) = if progress.has_total() {
        (ProgressBar::new(progress.total_bytes), BAR.as_ref())
    } else {
        (ProgressBar::new_spinner(), SPINNER.as_ref())
    };
    let bar = match style {
        Some(style) => bar.with_style(style.clone()),
        None => bar,
    };
    bar.with_prefix(progress.file_name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_parse() {
        assert!(BAR.is_some());
        assert!(SPINNER.is_some());
    }

    #[test]
    fn one_bar_per_file() {
        let bars = TransferBars::with_multi(MultiProgress::with_draw_target(
            indicatif::ProgressDrawTarget::hidden(),
        ));
        let sink = bars.sink();

        sink(&Progress::new("a.gtfs.zip", 10, 20));
        sink(&Progress::new("m.osm.pbf", 5, 0));
        sink(&Progress::new("a.gtfs.zip", 20, 20));
        bars.finish();

        assert_eq!(bars.totals(), [
            ("a.gtfs.zip".to_string(), 20),
            ("m.osm.pbf".to_string(), 5)
        ]);
    }

    #[test]
    fn summary_lists_every_file() {
        let bars = TransferBars::with_multi(MultiProgress::with_draw_target(
            indicatif::ProgressDrawTarget::hidden(),
        ));
        let sink = bars.sink();
        sink(&Progress::new("m.osm.pbf", 2048, 2048));

        assert_eq!(bars.summary(), ["  m.osm.pbf 2.00 KiB"]);
    }

    #[test]
    fn suspending_writer_passes_bytes_through() {
        assert_eq!(SuspendingStderr.write(b"").unwrap(), 0);
        SuspendingStderr.flush().unwrap();
    }
}
