//! Load blocks and the production schedule from CSV

use super::{Block, Period, ScheduleEntry};
use crate::error::{EngineError, EngineResult};
use csv::Reader;
use std::path::Path;

/// Raw CSV row matching blocks.csv columns
#[derive(Debug, serde::Deserialize)]
struct BlockRow {
    #[serde(rename = "BlockId")]
    block_id: String,
    #[serde(rename = "Category", default)]
    category: Option<String>,
    #[serde(rename = "Depth")]
    depth_m: f64,
    #[serde(rename = "Tonnage")]
    tonnage: f64,
    #[serde(rename = "Volume", default)]
    volume_m3: f64,
    #[serde(rename = "Grade", default)]
    grade: f64,
    #[serde(rename = "RockType")]
    rock_type: String,
    #[serde(rename = "Hardness")]
    hardness: f64,
    #[serde(rename = "Abrasivity", default)]
    abrasivity: f64,
    #[serde(rename = "StrikeLength")]
    strike_length_m: f64,
    #[serde(rename = "Width")]
    width_m: f64,
    #[serde(rename = "Height", default)]
    height_m: f64,
}

impl BlockRow {
    fn into_block(self) -> EngineResult<Block> {
        let id = self.block_id.trim().to_string();
        if id.is_empty() {
            return Err(EngineError::Config("block row with empty BlockId".to_string()));
        }

        let mut block = Block::new(
            &id,
            self.depth_m,
            self.tonnage,
            self.rock_type.trim(),
            self.hardness,
            self.strike_length_m,
            self.width_m,
        );
        if let Some(category) = self.category.filter(|c| !c.trim().is_empty()) {
            block.category = category.trim().to_string();
        }
        block.volume_m3 = self.volume_m3;
        block.grade = self.grade;
        block.abrasivity = self.abrasivity;
        block.height_m = self.height_m;
        Ok(block)
    }
}

/// Raw CSV row matching schedule.csv columns
#[derive(Debug, serde::Deserialize)]
struct ScheduleRow {
    #[serde(rename = "BlockId")]
    block_id: String,
    #[serde(rename = "Period")]
    period: String,
    #[serde(rename = "Sequence", default)]
    sequence: u32,
}

impl ScheduleRow {
    fn into_entry(self) -> EngineResult<ScheduleEntry> {
        let period: Period = self.period.parse()?;
        Ok(ScheduleEntry::new(self.block_id.trim(), period, self.sequence))
    }
}

/// Load all blocks from a CSV file
pub fn load_blocks<P: AsRef<Path>>(path: P) -> EngineResult<Vec<Block>> {
    let reader = Reader::from_path(path)?;
    read_blocks(reader)
}

/// Load blocks from any reader (e.g., string buffer)
pub fn load_blocks_from_reader<R: std::io::Read>(reader: R) -> EngineResult<Vec<Block>> {
    read_blocks(Reader::from_reader(reader))
}

fn read_blocks<R: std::io::Read>(mut reader: Reader<R>) -> EngineResult<Vec<Block>> {
    let mut blocks = Vec::new();
    for result in reader.deserialize() {
        let row: BlockRow = result?;
        blocks.push(row.into_block()?);
    }
    Ok(blocks)
}

/// Load the production schedule from a CSV file
pub fn load_schedule<P: AsRef<Path>>(path: P) -> EngineResult<Vec<ScheduleEntry>> {
    let reader = Reader::from_path(path)?;
    read_schedule(reader)
}

pub fn load_schedule_from_reader<R: std::io::Read>(reader: R) -> EngineResult<Vec<ScheduleEntry>> {
    read_schedule(Reader::from_reader(reader))
}

fn read_schedule<R: std::io::Read>(mut reader: Reader<R>) -> EngineResult<Vec<ScheduleEntry>> {
    let mut entries = Vec::new();
    for result in reader.deserialize() {
        let row: ScheduleRow = result?;
        entries.push(row.into_entry()?);
    }
    Ok(entries)
}
