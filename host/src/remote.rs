use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use tycoon::{Country, RawBoard, Remote, ScoreRecord};

/// File-backed stand-in for the remote configuration/scoring service.
///
/// Board and country lists are read from JSON files; submitted scores are
/// appended to a JSON ledger file. The engine only ever sees the `Remote`
/// contract, so swapping this for an HTTP client is a host concern.
pub struct FileRemote {
    board_path: PathBuf,
    countries_path: Option<PathBuf>,
    scores_path: Option<PathBuf>,
}

impl FileRemote {
    pub fn new(
        board_path: PathBuf,
        countries_path: Option<PathBuf>,
        scores_path: Option<PathBuf>,
    ) -> Self {
        Self {
            board_path,
            countries_path,
            scores_path,
        }
    }
}

impl Remote for FileRemote {
    fn fetch_board(&mut self) -> anyhow::Result<RawBoard> {
        let file = File::open(&self.board_path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn fetch_countries(&mut self) -> anyhow::Result<Vec<Country>> {
        let Some(path) = &self.countries_path else {
            return Ok(Vec::new());
        };
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn submit_score(&mut self, record: &ScoreRecord) -> anyhow::Result<()> {
        let Some(path) = &self.scores_path else {
            return Ok(());
        };
        let mut ledger: Vec<ScoreRecord> = match File::open(path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file))?,
            Err(_) => Vec::new(),
        };
        ledger.push(record.clone());
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, &ledger)?;
        Ok(())
    }
}
