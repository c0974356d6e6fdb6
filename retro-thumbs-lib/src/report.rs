//! Run totals and the text log written after a run.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ThumbsError;
use crate::materialize::SaveOutcome;
use crate::session::SelectionLog;

/// Default file name for the run log.
pub const DEFAULT_LOG_FILE: &str = "retro-thumbs.log";

/// Totals over a selection log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Images found in the LaunchBox library
    pub images_found: usize,
    /// Game files found in both LaunchBox and RetroArch
    pub games_matched: usize,
    /// Thumbnails written (new and overwritten)
    pub images_saved: usize,
    pub overwritten: usize,
    /// Saved thumbnails whose source was already saved for another file
    pub duplicates: usize,
    pub skipped: usize,
    pub save_errors: usize,
    pub edit_errors: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn from_log(log: &SelectionLog) -> Self {
        let mut summary = Self {
            images_found: log.images_found(),
            games_matched: log.matched_files(),
            elapsed: log.elapsed(),
            ..Self::default()
        };
        let mut used_sources: HashSet<&PathBuf> = HashSet::new();
        for entry in log.entries() {
            match &entry.outcome {
                SaveOutcome::New | SaveOutcome::Overwritten => {
                    summary.images_saved += 1;
                    if entry.outcome == SaveOutcome::Overwritten {
                        summary.overwritten += 1;
                    }
                    if !used_sources.insert(&entry.source) {
                        summary.duplicates += 1;
                    }
                }
                SaveOutcome::Error(_) => summary.save_errors += 1,
                _ => summary.skipped += 1,
            }
            if entry.outcome != SaveOutcome::SkippedExists
                && entry.edit.as_ref().is_some_and(|e| e.is_error())
            {
                summary.edit_errors += 1;
            }
        }
        summary
    }
}

/// `12.3s`, `4:05.2`, or `1:02:03.0`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs_f64();
    let hours = (total / 3600.0).floor() as u64;
    let minutes = ((total % 3600.0) / 60.0).floor() as u64;
    let seconds = total % 60.0;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:04.1}")
    } else if minutes > 0 {
        format!("{minutes}:{seconds:04.1}")
    } else {
        format!("{seconds:.1}s")
    }
}

/// Text report of a run: header, totals, then every selection grouped by
/// title and game file.
pub struct RunReport<'a> {
    log: &'a SelectionLog,
    preset: &'a str,
}

impl<'a> RunReport<'a> {
    pub fn new(log: &'a SelectionLog, preset: &'a str) -> Self {
        Self { log, preset }
    }

    pub fn write_to(&self, out: &mut impl Write) -> std::io::Result<()> {
        let summary = RunSummary::from_log(self.log);

        writeln!(out, "=== retro-thumbs log ===")?;
        writeln!(
            out,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(out, "Preset: {}", self.preset)?;
        writeln!(out)?;
        writeln!(out, "--- Summary ---")?;
        writeln!(out, "Images found in LaunchBox: {}", summary.images_found)?;
        writeln!(
            out,
            "Game files in LaunchBox and RetroArch: {}",
            summary.games_matched
        )?;
        writeln!(
            out,
            "Thumbnails saved: {} ({} overwritten, {} duplicates)",
            summary.images_saved, summary.overwritten, summary.duplicates
        )?;
        writeln!(out, "Skipped: {}", summary.skipped)?;
        writeln!(out, "Save errors: {}", summary.save_errors)?;
        writeln!(out, "Edit errors: {}", summary.edit_errors)?;
        writeln!(out, "Completed in: {}", format_elapsed(summary.elapsed))?;
        writeln!(out)?;
        writeln!(out, "--- Details ---")?;

        for (title, files) in self.log.by_title() {
            writeln!(out)?;
            writeln!(out, "{title}")?;
            for (game_file, entries) in files {
                writeln!(out, "  {}", game_file.display())?;
                for entry in entries {
                    let tag = match &entry.outcome {
                        SaveOutcome::New | SaveOutcome::Overwritten => "[OK]",
                        SaveOutcome::Error(_) => "[ERROR]",
                        _ => "[SKIP]",
                    };
                    writeln!(
                        out,
                        "    {} {}: {} -> {} ({})",
                        tag,
                        entry.category,
                        entry.source.display(),
                        entry.destination.display(),
                        entry.outcome
                    )?;
                    if let Some(edit) = &entry.edit {
                        let (w, h) = edit.original;
                        match (edit.resized, &edit.error) {
                            (_, Some(error)) => {
                                writeln!(out, "         Edit failed ({w}x{h}): {error}")?
                            }
                            (Some((nw, nh)), None) => {
                                writeln!(out, "         Resized {w}x{h} -> {nw}x{nh}")?
                            }
                            (None, None) => {}
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn write_to_file(&self, path: &Path) -> Result<(), ThumbsError> {
        let file = std::fs::File::create(path).map_err(|e| ThumbsError::file(path, e))?;
        let mut out = std::io::BufWriter::new(file);
        self.write_to(&mut out)
            .and_then(|_| out.flush())
            .map_err(|e| ThumbsError::file(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materialize::ImageEdit;
    use crate::session::{SelectionEntry, SelectionSession, TitleKey};
    use retro_thumbs_core::MediaCategory;

    fn record(session: &mut SelectionSession, file: &str, source: &str, outcome: SaveOutcome) {
        session.record_selection(SelectionEntry {
            title: TitleKey::new("Sega Saturn", "Panzer Dragoon Saga"),
            game_file: PathBuf::from(file),
            category: MediaCategory::FrontBoxart,
            source: PathBuf::from(source),
            destination: PathBuf::from(format!("/ra/{file}.png")),
            outcome,
            edit: None,
        });
    }

    #[test]
    fn test_summary_counts() {
        let mut session = SelectionSession::new();
        record(&mut session, "d1", "/lb/a.png", SaveOutcome::New);
        record(&mut session, "d2", "/lb/a.png", SaveOutcome::Overwritten);
        record(&mut session, "d3", "/lb/b.png", SaveOutcome::SkippedExists);
        record(&mut session, "d4", "/lb/c.png", SaveOutcome::Error("boom".into()));
        session.attach_edit(
            &TitleKey::new("Sega Saturn", "Panzer Dragoon Saga"),
            Path::new("d1"),
            MediaCategory::FrontBoxart,
            ImageEdit {
                original: (10, 10),
                resized: None,
                error: Some("too small".into()),
            },
        );

        let summary = RunSummary::from_log(session.log());
        assert_eq!(summary.images_saved, 2);
        assert_eq!(summary.overwritten, 1);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.save_errors, 1);
        assert_eq!(summary.edit_errors, 1);
    }

    #[test]
    fn test_elapsed_formats() {
        assert_eq!(format_elapsed(Duration::from_millis(12_340)), "12.3s");
        assert_eq!(format_elapsed(Duration::from_millis(245_200)), "4:05.2");
        assert_eq!(format_elapsed(Duration::from_secs(3723)), "1:02:03.0");
    }

    #[test]
    fn test_report_lists_details() {
        let mut session = SelectionSession::new();
        record(&mut session, "d1", "/lb/a.png", SaveOutcome::New);
        let mut out = Vec::new();
        RunReport::new(session.log(), "default")
            .write_to(&mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("=== retro-thumbs log ==="));
        assert!(text.contains("Preset: default"));
        assert!(text.contains("Thumbnails saved: 1"));
        assert!(text.contains("Panzer Dragoon Saga (Sega Saturn)"));
        assert!(text.contains("[OK] Boxart: /lb/a.png -> /ra/d1.png (saved)"));
    }
}
