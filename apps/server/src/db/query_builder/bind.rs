use super::BindValue;

/// Push a bind value and return its 1-based placeholder index.
pub(super) fn push_bind(bind_params: &mut Vec<BindValue>, value: BindValue) -> usize {
    bind_params.push(value);
    bind_params.len()
}

pub(super) fn push_text(bind_params: &mut Vec<BindValue>, value: String) -> usize {
    push_bind(bind_params, BindValue::Text(value))
}

pub(super) fn push_float(bind_params: &mut Vec<BindValue>, value: f64) -> usize {
    push_bind(bind_params, BindValue::Float(value))
}

/// Page offsets and limits are unsigned; Postgres wants BIGINT.
pub(super) fn push_count(bind_params: &mut Vec<BindValue>, value: u64) -> usize {
    push_bind(
        bind_params,
        BindValue::Int(i64::try_from(value).unwrap_or(i64::MAX)),
    )
}

/// Escape SQL LIKE meta-characters so user input is matched literally.
pub(super) fn escape_like_pattern(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
