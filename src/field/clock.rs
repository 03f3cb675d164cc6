const MS_PER_DAY: i64 = 86_400_000;

/// Calendar-derived terms for the atmosphere field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallClock {
    /// Day of the year, `1..=366`.
    pub day_of_year: u32,
    /// Whole seconds since local midnight, `0..86400`.
    pub seconds_in_day: u32,
    /// Fraction of the local day elapsed, `[0, 1)`.
    pub day_fraction: f64,
}

impl WallClock {
    /// Derive from Unix milliseconds shifted by a UTC offset.
    pub fn from_unix_ms(unix_ms: i64, utc_offset_minutes: i32) -> Self {
        let local_ms = unix_ms.saturating_add(i64::from(utc_offset_minutes) * 60_000);
        let days = local_ms.div_euclid(MS_PER_DAY);
        let ms_in_day = local_ms.rem_euclid(MS_PER_DAY);

        let (year, _, _) = civil_from_days(days);
        let jan1 = days_from_civil(year, 1, 1);
        let day_of_year = (days - jan1 + 1) as u32;

        Self {
            day_of_year,
            seconds_in_day: (ms_in_day / 1000) as u32,
            day_fraction: ms_in_day as f64 / MS_PER_DAY as f64,
        }
    }

    /// Seasonal phase in `[-1, 1]`, peaking near the June solstice.
    pub fn seasonal(&self) -> f64 {
        (std::f64::consts::TAU * (f64::from(self.day_of_year) - 80.0) / 365.25).sin()
    }

    /// Daylight curve in `[0, 1]`: 0 at midnight, 1 at noon.
    pub fn daylight(&self) -> f64 {
        0.5 - 0.5 * (std::f64::consts::TAU * self.day_fraction).cos()
    }
}

// Proleptic Gregorian conversions over days since 1970-01-01.
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    (if m <= 2 { y + 1 } else { y }, m, d)
}

fn days_from_civil(y: i64, m: u32, d: u32) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = y.div_euclid(400);
    let yoe = y.rem_euclid(400);
    let m = i64::from(m);
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(d) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

#[cfg(test)]
#[path = "../../tests/unit/field/clock.rs"]
mod tests;
