//! 时间工具: 时钟与业务时区转换
//!
//! 所有日期→时间戳转换统一在这里完成，
//! repository 层只接收 `i64` Unix millis。

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{NaiveDate, TimeZone};
use chrono_tz::Tz;

/// 时间源
///
/// 订单的 `created_at` / `updated_at` 都从这里取，测试中注入 [`FixedClock`]。
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// 当前时间 (Unix millis)
    fn now_millis(&self) -> i64;
}

/// 系统时钟
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// 可手动设置的时钟
#[derive(Debug, Default)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    pub fn new(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_millis: i64) {
        self.millis.fetch_add(delta_millis, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// 日期零点 → Unix millis (业务时区)
///
/// DST gap fallback: 如果本地零点不存在 (夏令时跳跃)，fallback 到 UTC。
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 月初第一毫秒 (业务时区)
///
/// 调用方保证 `month` 在 1..=12，否则返回 None。
pub fn month_start_millis(year: i32, month: u32, tz: Tz) -> Option<i64> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|date| day_start_millis(date, tz))
}

/// 月末最后一毫秒 (23:59:59.999, 业务时区)
///
/// 即下个月月初减 1ms，整个月都包含在内。
pub fn month_end_millis(year: i32, month: u32, tz: Tz) -> Option<i64> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(chrono::Months::new(1))?;
    Some(day_start_millis(next, tz) - 1)
}
