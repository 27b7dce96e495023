//! SQLite adapter for ContributionStore
//!
//! One database file holds one election cycle. Reads build their SQL from the
//! configured [`SchemaConfig`]; writes are batched, one transaction per batch,
//! and a failing row rolls the whole batch back.

use rusqlite::{params, Connection, Transaction};
use std::path::Path;
use tracing::{debug, warn};

use crate::domain::{
    ContributionStore, ContributorRow, RecipientRow, SchemaConfig, TransactionRow,
};
use crate::error::{Result, StorageError};

/// SQLite-based ContributionStore implementation
pub struct SqliteContributionStore {
    conn: Connection,
    schema: SchemaConfig,
}

impl SqliteContributionStore {
    /// Open an existing cycle database
    pub fn open(db_path: impl AsRef<Path>, schema: SchemaConfig) -> Result<Self> {
        schema.validate()?;
        let conn = Connection::open(db_path.as_ref())?;
        debug!("Opened contribution store at {}", db_path.as_ref().display());
        Ok(Self { conn, schema })
    }

    /// Create an in-memory store with empty tables (for testing)
    pub fn in_memory(schema: SchemaConfig) -> Result<Self> {
        schema.validate()?;
        let conn = Connection::open_in_memory()?;
        let store = Self { conn, schema };
        store.init_schema()?;
        Ok(store)
    }

    pub fn schema(&self) -> &SchemaConfig {
        &self.schema
    }

    /// Create the three tables if they do not exist
    pub fn init_schema(&self) -> Result<()> {
        let c = &self.schema.contributors;
        self.conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    {} INTEGER PRIMARY KEY,
                    {} INTEGER,
                    {} TEXT,
                    {} REAL
                )",
                c.table, c.contributor_id, c.is_individual, c.state, c.cf_score
            ),
            [],
        )?;

        let r = &self.schema.recipients;
        self.conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    {year} INTEGER NOT NULL,
                    {rid} TEXT NOT NULL,
                    {seat} TEXT NOT NULL,
                    {party} INTEGER,
                    {district} TEXT,
                    {incumb} INTEGER,
                    {cfs} REAL,
                    {cfsdyn} REAL,
                    {numgivers} INTEGER,
                    {gender} INTEGER,
                    {didprimary} INTEGER,
                    {winner} INTEGER,
                    {partisanship} REAL,
                    {indistrict} REAL,
                    {instate} REAL,
                    {candstatus} INTEGER,
                    {fecyear} INTEGER,
                    {candorcomm} INTEGER,
                    PRIMARY KEY ({year}, {rid}, {seat})
                )",
                table = r.table,
                year = r.year,
                rid = r.recipient_id,
                seat = r.seat,
                party = r.party,
                district = r.district,
                incumb = r.incumbency,
                cfs = r.cf_score,
                cfsdyn = r.cf_score_dynamic,
                numgivers = r.num_givers,
                gender = r.gender,
                didprimary = r.did_primary,
                winner = r.winner,
                partisanship = r.partisanship,
                indistrict = r.in_district,
                instate = r.in_state,
                candstatus = r.candidate_status,
                fecyear = r.fec_year,
                candorcomm = r.is_committee,
            ),
            [],
        )?;

        let t = &self.schema.transactions;
        self.conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    {year} INTEGER NOT NULL,
                    {tid} TEXT NOT NULL,
                    {ttid} TEXT,
                    {amount} INTEGER NOT NULL,
                    {date} TEXT,
                    {cid} INTEGER NOT NULL,
                    {indiv} INTEGER,
                    {rid} TEXT,
                    {party} INTEGER,
                    {candorcomm} INTEGER,
                    {district} TEXT,
                    {seat} TEXT,
                    {cfscore} REAL,
                    {cfs} REAL,
                    PRIMARY KEY ({year}, {tid})
                )",
                table = t.table,
                year = t.year,
                tid = t.transaction_id,
                ttid = t.transaction_type,
                amount = t.amount,
                date = t.date,
                cid = t.contributor_id,
                indiv = t.is_individual,
                rid = t.recipient_id,
                party = t.party,
                candorcomm = t.is_committee,
                district = t.district,
                seat = t.seat,
                cfscore = t.contributor_cf_score,
                cfs = t.recipient_cf_score,
            ),
            [],
        )?;

        self.conn.execute(
            &format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_{cid} ON {table}({cid})",
                table = t.table,
                cid = t.contributor_id
            ),
            [],
        )?;

        Ok(())
    }

    /// Insert contributors in one transaction
    pub fn insert_contributors(&mut self, rows: &[ContributorRow]) -> Result<usize> {
        let c = &self.schema.contributors;
        let sql = insert_sql(&c.table, &c.select_list());
        in_transaction(&mut self.conn, "contributors", |tx| {
            let mut stmt = tx.prepare_cached(&sql)?;
            for row in rows {
                stmt.execute(params![
                    row.contributor_id,
                    row.is_individual,
                    row.state,
                    row.cf_score
                ])?;
            }
            Ok(rows.len())
        })
    }

    /// Insert recipients in one transaction
    pub fn insert_recipients(&mut self, rows: &[RecipientRow]) -> Result<usize> {
        let r = &self.schema.recipients;
        let sql = insert_sql(&r.table, &r.select_list());
        in_transaction(&mut self.conn, "recipients", |tx| {
            let mut stmt = tx.prepare_cached(&sql)?;
            for row in rows {
                stmt.execute(params![
                    row.year,
                    row.recipient_id,
                    row.seat,
                    row.party,
                    row.district,
                    row.incumbency,
                    row.cf_score,
                    row.cf_score_dynamic,
                    row.num_givers,
                    row.gender,
                    row.did_primary,
                    row.winner,
                    row.partisanship,
                    row.in_district,
                    row.in_state,
                    row.candidate_status,
                    row.fec_year,
                    row.is_committee,
                ])?;
            }
            Ok(rows.len())
        })
    }

    /// Insert transactions in one transaction
    ///
    /// A malformed row (e.g. a duplicate primary key) aborts and rolls back
    /// the entire batch.
    pub fn insert_transactions(&mut self, rows: &[TransactionRow]) -> Result<usize> {
        let t = &self.schema.transactions;
        let sql = insert_sql(&t.table, &t.select_list());
        in_transaction(&mut self.conn, "transactions", |tx| {
            let mut stmt = tx.prepare_cached(&sql)?;
            for row in rows {
                stmt.execute(params![
                    row.year,
                    row.transaction_id,
                    row.transaction_type,
                    row.amount,
                    row.date,
                    row.contributor_id,
                    row.is_individual,
                    row.recipient_id,
                    row.party,
                    row.is_committee,
                    row.district,
                    row.seat,
                    row.contributor_cf_score,
                    row.recipient_cf_score,
                ])?;
            }
            Ok(rows.len())
        })
    }

    /// Count rows of a configured table
    pub fn count(&self, table: &str) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?;
        Ok(n as usize)
    }
}

impl ContributionStore for SqliteContributionStore {
    fn contributors(&self) -> Result<Vec<ContributorRow>> {
        let c = &self.schema.contributors;
        let t = &self.schema.transactions;
        let sql = format!(
            "SELECT {cols} FROM {table} WHERE {cid} IN (SELECT {tcid} FROM {ttable}) ORDER BY {cid}",
            cols = c.select_list().join(", "),
            table = c.table,
            cid = c.contributor_id,
            tcid = t.contributor_id,
            ttable = t.table,
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ContributorRow {
                    contributor_id: row.get(0)?,
                    is_individual: row.get(1)?,
                    state: row.get(2)?,
                    cf_score: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn recipients(&self) -> Result<Vec<RecipientRow>> {
        let r = &self.schema.recipients;
        let t = &self.schema.transactions;
        let cols: Vec<String> = r.select_list().iter().map(|c| format!("r.{}", c)).collect();
        let sql = format!(
            "SELECT DISTINCT {cols} FROM {rtable} r JOIN {ttable} t
             ON r.{rid} = t.{trid} AND r.{year} = t.{tyear} AND r.{seat} = t.{tseat}
             ORDER BY r.{year}, r.{rid}, r.{seat}",
            cols = cols.join(", "),
            rtable = r.table,
            ttable = t.table,
            rid = r.recipient_id,
            trid = t.recipient_id,
            year = r.year,
            tyear = t.year,
            seat = r.seat,
            tseat = t.seat,
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RecipientRow {
                    year: row.get(0)?,
                    recipient_id: row.get(1)?,
                    seat: row.get(2)?,
                    party: row.get(3)?,
                    district: row.get(4)?,
                    incumbency: row.get(5)?,
                    cf_score: row.get(6)?,
                    cf_score_dynamic: row.get(7)?,
                    num_givers: row.get(8)?,
                    gender: row.get(9)?,
                    did_primary: row.get(10)?,
                    winner: row.get(11)?,
                    partisanship: row.get(12)?,
                    in_district: row.get(13)?,
                    in_state: row.get(14)?,
                    candidate_status: row.get(15)?,
                    fec_year: row.get(16)?,
                    is_committee: row.get(17)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn transactions(&self) -> Result<Vec<TransactionRow>> {
        let t = &self.schema.transactions;
        let sql = format!(
            "SELECT {} FROM {} ORDER BY rowid",
            t.select_list().join(", "),
            t.table
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(TransactionRow {
                    year: row.get(0)?,
                    transaction_id: row.get(1)?,
                    transaction_type: row.get(2)?,
                    amount: row.get(3)?,
                    date: row.get(4)?,
                    contributor_id: row.get(5)?,
                    is_individual: row.get(6)?,
                    recipient_id: row.get(7)?,
                    party: row.get(8)?,
                    is_committee: row.get(9)?,
                    district: row.get(10)?,
                    seat: row.get(11)?,
                    contributor_cf_score: row.get(12)?,
                    recipient_cf_score: row.get(13)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

fn insert_sql(table: &str, columns: &[&str]) -> String {
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Run `f` inside a transaction: commit on success, roll back on any error
fn in_transaction<F>(conn: &mut Connection, label: &str, f: F) -> Result<usize>
where
    F: FnOnce(&Transaction<'_>) -> Result<usize>,
{
    let tx = conn.transaction()?;
    match f(&tx) {
        Ok(n) => {
            tx.commit().map_err(|e| {
                StorageError::transaction(format!("commit of {} batch failed", label))
                    .with_source(e)
            })?;
            debug!("Committed {} {} rows", n, label);
            Ok(n)
        }
        Err(err) => {
            warn!("Rolling back {} batch: {}", label, err);
            tx.rollback().map_err(|e| {
                StorageError::transaction(format!("rollback of {} batch failed", label))
                    .with_source(e)
            })?;
            Err(err)
        }
    }
}
