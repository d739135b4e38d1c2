use crate::model::HourlyHumiditySeries;

pub const PLACEHOLDER: &str = "--";

/// Humidity for `target`, formatted as `"55%"`.
///
/// Falls back to the first reading when no timestamp matches (or the
/// matching reading is missing), and to `"--"` when there is nothing to show.
/// A series missing either array counts as absent.
pub fn resolve(series: Option<&HourlyHumiditySeries>, target: &str) -> String {
    let Some(HourlyHumiditySeries { time: Some(time), relativehumidity_2m: Some(values) }) = series
    else {
        return PLACEHOLDER.to_string();
    };

    let matched = time
        .iter()
        .position(|t| t == target)
        .and_then(|idx| values.get(idx).copied().flatten());

    matched
        .or_else(|| values.first().copied().flatten())
        .map(|value| format!("{value}%"))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}
