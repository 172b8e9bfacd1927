//! CSV 导出
//!
//! 把营收时间序列和排行榜写成 CSV，供表格软件或 BI 工具使用

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;

use crate::analytics::{RankingEntry, RevenueBucket};
use crate::errors::Result;

/// 营收导出行
#[derive(Debug, Clone, Serialize)]
pub struct RevenueCsvRow {
    pub bucket: String,
    pub revenue: String,
    pub order_count: u64,
}

impl From<&RevenueBucket> for RevenueCsvRow {
    fn from(bucket: &RevenueBucket) -> Self {
        Self {
            bucket: bucket.bucket_key.clone(),
            revenue: format!("{:.2}", bucket.revenue),
            order_count: bucket.order_count,
        }
    }
}

/// 排行榜导出行
#[derive(Debug, Clone, Serialize)]
pub struct RankingCsvRow {
    pub rank: usize,
    pub key: String,
    pub total: String,
    pub count: u64,
}

const REVENUE_HEADER: [&str; 3] = ["bucket", "revenue", "order_count"];
const RANKING_HEADER: [&str; 4] = ["rank", "key", "total", "count"];

/// 写入营收序列
///
/// 表头总是写出，空序列也得到一个只有表头的文件
pub fn write_revenue_csv<W: Write>(buckets: &[RevenueBucket], writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(REVENUE_HEADER)?;
    for bucket in buckets {
        csv_writer.serialize(RevenueCsvRow::from(bucket))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// 写入排行榜
pub fn write_ranking_csv<W: Write>(entries: &[RankingEntry], writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(RANKING_HEADER)?;
    for (idx, entry) in entries.iter().enumerate() {
        csv_writer.serialize(RankingCsvRow {
            rank: idx + 1,
            key: entry.key.clone(),
            total: format!("{:.2}", entry.total_value),
            count: entry.count_value,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// 导出营收序列到 CSV 文件
pub fn export_revenue_to_csv<P: AsRef<Path>>(buckets: &[RevenueBucket], path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_revenue_csv(buckets, BufWriter::new(file))
}

/// 导出排行榜到 CSV 文件
pub fn export_ranking_to_csv<P: AsRef<Path>>(entries: &[RankingEntry], path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_ranking_csv(entries, BufWriter::new(file))
}
