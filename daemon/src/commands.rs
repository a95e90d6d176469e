//! Subcommand bodies. Each writes JSON to `out`, one value per line.

use std::io::{BufRead, Write};

use anyhow::Context;
use serde::Deserialize;
use serde_json::json;

use seed_store::TokenStore;
use seed_token::{ActionRequest, Table, TableRows, TokenEngine};
use seed_types::{SymbolCode, Timestamp};

/// One line of an action file. `now` overrides the command's default time.
#[derive(Deserialize)]
struct ActionLine {
    #[serde(default)]
    now: Option<u64>,
    #[serde(flatten)]
    request: ActionRequest,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// Apply every action in `input`. A rejected or malformed line is reported
/// and skipped; it never stops the run.
pub fn apply_lines<S: TokenStore>(
    engine: &TokenEngine<S>,
    input: impl BufRead,
    now: Timestamp,
    out: &mut impl Write,
) -> anyhow::Result<ApplySummary> {
    let mut summary = ApplySummary::default();
    for (index, line) in input.lines().enumerate() {
        let line = line.context("reading action file")?;
        let number = index + 1;
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let parsed: ActionLine = match serde_json::from_str(&line) {
            Ok(parsed) => parsed,
            Err(e) => {
                summary.rejected += 1;
                tracing::warn!(line = number, error = %e, "malformed action line");
                writeln!(out, "{}", json!({"line": number, "error": "Parse", "message": e.to_string()}))?;
                continue;
            }
        };

        let at = parsed.now.map(Timestamp::new).unwrap_or(now);
        let result = match engine.apply(&parsed.request, at) {
            Ok(receipt) => {
                summary.accepted += 1;
                json!({"line": number, "ok": receipt})
            }
            Err(e) => {
                summary.rejected += 1;
                json!({"line": number, "error": e.kind(), "message": e.to_string()})
            }
        };
        writeln!(out, "{result}")?;
    }
    Ok(summary)
}

pub fn print_table<S: TokenStore>(
    engine: &TokenEngine<S>,
    table: &str,
    scope: &str,
    now: Timestamp,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let table: Table = table.parse()?;
    let rows = engine.query_table(table, scope)?;
    if let TableRows::Refund(refunds) = &rows {
        for row in refunds {
            tracing::info!(
                owner = scope,
                quantity = %row.quantity,
                status = %seed_utils::describe_maturity(row.maturity, now),
                "pending refund"
            );
        }
    }
    writeln!(out, "{}", serde_json::to_string(&rows)?)?;
    Ok(())
}

/// Audit one currency, or all of them when `code` is `None`.
pub fn print_audit<S: TokenStore>(
    engine: &TokenEngine<S>,
    code: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let audits = match code {
        Some(code) => {
            let code = SymbolCode::new(code)?;
            let audit = engine
                .audit(&code)?
                .with_context(|| format!("token with symbol {code} does not exist"))?;
            vec![audit]
        }
        None => engine.audit_all()?,
    };
    let mut balanced = true;
    for audit in &audits {
        balanced &= audit.is_balanced();
        writeln!(
            out,
            "{}",
            json!({"balanced": audit.is_balanced(), "audit": audit})
        )?;
    }
    Ok(balanced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_nullables::NullStore;
    use seed_types::TokenParams;

    const ACTIONS: &str = r#"
# bootstrap SEED
{"authorization": ["parslseed123@active"], "action": {"name": "create", "data": {"issuer": "parslseed123", "maximum_supply": "10000000000.0000 SEED"}}}
{"authorization": ["parslseed123@active"], "action": {"name": "issue", "data": {"to": "user1", "quantity": "10.0000 SEED", "memo": ""}}}
{"authorization": ["user1@active"], "action": {"name": "stake", "data": {"owner": "user1", "quantity": "4.0000 SEED"}}}
{"authorization": ["user1@active"], "action": {"name": "unstake", "data": {"owner": "user1", "quantity": "4.0000 SEED"}}}
{"now": 604900, "authorization": ["user1@active"], "action": {"name": "refund", "data": {"owner": "user1", "sym": "4,SEED"}}}
{"authorization": ["user2@active"], "action": {"name": "transfer", "data": {"from": "user2", "to": "user1", "quantity": "1.0000 SEED"}}}
not json
"#;

    fn output_lines(out: Vec<u8>) -> Vec<serde_json::Value> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_apply_reports_every_line() {
        let engine = TokenEngine::new(NullStore::new(), TokenParams::default());
        let mut out = Vec::new();
        let summary = apply_lines(&engine, ACTIONS.as_bytes(), Timestamp::new(100), &mut out).unwrap();
        assert_eq!(summary, ApplySummary { accepted: 5, rejected: 2 });

        let lines = output_lines(out);
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0]["ok"]["action"], "create");
        assert_eq!(lines[4]["ok"]["action"], "refund");
        assert_eq!(lines[5]["error"], "InsufficientBalance");
        assert_eq!(lines[6]["error"], "Parse");
    }

    #[test]
    fn test_table_and_audit_output() {
        let engine = TokenEngine::new(NullStore::new(), TokenParams::default());
        apply_lines(&engine, ACTIONS.as_bytes(), Timestamp::new(100), &mut Vec::new()).unwrap();

        let mut out = Vec::new();
        print_table(&engine, "accounts", "user1", Timestamp::new(100), &mut out).unwrap();
        let rows = output_lines(out);
        assert_eq!(rows[0][0]["balance"], "10.0000 SEED");

        let mut out = Vec::new();
        assert!(print_audit(&engine, Some("SEED"), &mut out).unwrap());
        let audit = output_lines(out);
        assert_eq!(audit[0]["audit"]["supply"], "10.0000 SEED");

        assert!(print_table(&engine, "votes", "user1", Timestamp::EPOCH, &mut Vec::new()).is_err());
        assert!(print_audit(&engine, Some("TREE"), &mut Vec::new()).is_err());
    }
}
