/// Whether an `Accept` header admits a JSON response.
///
/// A missing or blank header accepts anything. Otherwise any media range matching
/// `application/json` with a non-zero `q` is enough.
pub fn accepts_json(accept: Option<&str>) -> bool {
    let accept = match accept.map(str::trim) {
        None | Some("") => return true,
        Some(value) => value,
    };

    accept.split(',').any(|range| {
        let mut parts = range.split(';');
        let media = parts.next().unwrap_or("").trim().to_ascii_lowercase();
        let weighted_out = parts.any(|param| {
            let (key, value) = param.split_once('=').unwrap_or((param, ""));
            key.trim().eq_ignore_ascii_case("q")
                && value.trim().parse::<f32>().map(|q| q <= 0.0).unwrap_or(false)
        });

        !weighted_out && matches_json(&media)
    })
}

fn matches_json(media: &str) -> bool {
    match media.split_once('/') {
        Some(("*", "*")) => true,
        Some(("application", subtype)) => subtype == "*" || subtype == "json",
        _ => false,
    }
}
