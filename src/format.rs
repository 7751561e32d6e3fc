//! 화면 표시용 숫자 포맷.

/// 천 단위 구분 기호(,)와 고정 소수 자릿수로 숫자를 문자열로 만든다.
///
/// `format_number(1234.5678, 2)` → `"1,234.57"`. NaN/무한대는 그대로 출력한다.
pub fn format_number(x: f64, decimals: usize) -> String {
    if !x.is_finite() {
        return format!("{x}");
    }
    let body = format!("{:.*}", decimals, x.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body.as_str(), None),
    };

    let mut out = String::with_capacity(body.len() + int_part.len() / 3 + 1);
    if x.is_sign_negative() {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// 그래프 축 눈금용: 정수 + 천 단위 구분.
pub fn format_axis(x: f64) -> String {
    format_number(x, 0)
}
