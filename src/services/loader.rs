use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{
    error::AppResult,
    models::{RawCredit, RawTitle},
};

/// Reads every record of a headed CSV stream
fn read_records<T, R>(reader: R) -> AppResult<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = csv::Reader::from_reader(reader);
    let records = reader.deserialize().collect::<Result<Vec<T>, _>>()?;
    Ok(records)
}

pub fn read_titles<R: Read>(reader: R) -> AppResult<Vec<RawTitle>> {
    read_records(reader)
}

pub fn read_credits<R: Read>(reader: R) -> AppResult<Vec<RawCredit>> {
    read_records(reader)
}

pub fn load_titles<P: AsRef<Path>>(path: P) -> AppResult<Vec<RawTitle>> {
    tracing::info!(path = ?path.as_ref(), "Loading titles");
    read_titles(File::open(path)?)
}

pub fn load_credits<P: AsRef<Path>>(path: P) -> AppResult<Vec<RawCredit>> {
    tracing::info!(path = ?path.as_ref(), "Loading credits");
    read_credits(File::open(path)?)
}
