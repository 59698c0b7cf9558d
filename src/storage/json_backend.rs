use std::{
    collections::HashSet,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use uuid::Uuid;

use crate::{
    errors::LedgerError,
    ledger::{GroupTarget, Ledger, Side},
    utils::{app_data_dir, ensure_dir},
};

use super::{Result, StorageBackend};

const LEDGER_DIR: &str = "ledgers";
const TMP_SUFFIX: &str = "tmp";

/// JSON snapshot backend storing each ledger as one pretty-printed file.
#[derive(Clone)]
pub struct JsonStorage {
    ledgers_dir: PathBuf,
}

impl JsonStorage {
    /// Creates a backend rooted at `root`, defaulting to the managed
    /// application directory (`KEEPR_HOME` or `~/.keepr`).
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = root.unwrap_or_else(app_data_dir);
        let ledgers_dir = base.join(LEDGER_DIR);
        ensure_dir(&ledgers_dir)?;
        Ok(Self { ledgers_dir })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn ledger_path(&self, name: &str) -> PathBuf {
        self.ledgers_dir
            .join(format!("{}.json", canonical_name(name)))
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, ledger: &Ledger, name: &str) -> Result<()> {
        let path = self.ledger_path(name);
        save_ledger_to_path(ledger, &path)
    }

    fn load(&self, name: &str) -> Result<Ledger> {
        let path = self.ledger_path(name);
        if !path.exists() {
            return Err(LedgerError::NotFound(name.to_string()));
        }
        load_ledger_from_path(&path)
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.ledgers_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.ledgers_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                entries.push(stem.to_string());
            }
        }
        entries.sort();
        Ok(entries)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.ledger_path(name);
        if !path.exists() {
            return Err(LedgerError::NotFound(name.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}

/// Writes the ledger atomically by staging to a temporary file first.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(ledger)?;
    let tmp = tmp_path(path);
    write_file(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_ledger_from_path(path: &Path) -> Result<Ledger> {
    let data = fs::read_to_string(path)?;
    let ledger: Ledger = serde_json::from_str(&data)?;
    Ok(ledger)
}

/// Detects dangling references and bookkeeping anomalies within a snapshot.
pub fn ledger_warnings(ledger: &Ledger) -> Vec<String> {
    let account_ids: HashSet<Uuid> = ledger.accounts.iter().map(|account| account.id).collect();
    let group_ids: HashSet<Uuid> = ledger.groups.iter().map(|group| group.id).collect();
    let nominal_groups: HashSet<Uuid> = ledger
        .groups
        .iter()
        .filter(|group| group.target == GroupTarget::ProfitAndLoss)
        .map(|group| group.id)
        .collect();
    let nominal_accounts: HashSet<Uuid> = ledger
        .accounts
        .iter()
        .filter(|account| {
            account
                .group_id
                .is_some_and(|group| nominal_groups.contains(&group))
        })
        .map(|account| account.id)
        .collect();
    let mut warnings = Vec::new();

    for account in &ledger.accounts {
        if let Some(group_id) = account.group_id {
            if !group_ids.contains(&group_id) {
                warnings.push(format!(
                    "account {} references unknown group {}",
                    account.number, group_id
                ));
            }
        }
    }
    for group in &ledger.groups {
        if let Some(parent_id) = group.parent_id {
            if !group_ids.contains(&parent_id) {
                warnings.push(format!(
                    "group `{}` references unknown parent {}",
                    group.name, parent_id
                ));
            }
        }
    }
    for journal in &ledger.journals {
        for posting in &journal.postings {
            if !account_ids.contains(&posting.account_id) {
                warnings.push(format!(
                    "journal {} posting references unknown account {}",
                    journal.id, posting.account_id
                ));
            }
        }
        let nominal_sides: HashSet<Side> = journal
            .postings
            .iter()
            .filter(|posting| nominal_accounts.contains(&posting.account_id))
            .map(|posting| posting.side)
            .collect();
        if nominal_sides.len() > 1 {
            warnings.push(format!(
                "journal {} books profit and loss accounts on both sides",
                journal.id
            ));
        }
    }
    warnings
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
