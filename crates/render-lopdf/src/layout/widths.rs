use serde_json::Value;

/// Width of a column or table column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidthSpec {
    /// Equal share of what is left after every other column.
    Star,
    /// Preferred width of the content.
    Auto,
    Fixed(f32),
    Percent(f32),
}

impl WidthSpec {
    pub fn parse(value: Option<&Value>) -> WidthSpec {
        match value {
            Some(Value::Number(n)) => n
                .as_f64()
                .map_or(WidthSpec::Star, |w| WidthSpec::Fixed(w as f32)),
            Some(Value::String(s)) => {
                let s = s.trim();
                if s == "*" {
                    WidthSpec::Star
                } else if s.eq_ignore_ascii_case("auto") {
                    WidthSpec::Auto
                } else if let Some(p) = s.strip_suffix('%').and_then(|p| p.trim().parse().ok()) {
                    WidthSpec::Percent(p)
                } else if let Ok(w) = s.parse() {
                    WidthSpec::Fixed(w)
                } else {
                    WidthSpec::Star
                }
            }
            _ => WidthSpec::Star,
        }
    }
}

/// Splits `available` points between columns.
///
/// Fixed and percentage columns take their size first. Auto columns get their preferred
/// width from `natural`, scaled down together when they would not fit. Star columns share
/// the rest equally.
pub fn distribute(specs: &[WidthSpec], available: f32, natural: &[f32]) -> Vec<f32> {
    let mut widths = vec![0.0; specs.len()];
    let mut used = 0.0;
    let mut autos = Vec::new();
    let mut stars = Vec::new();

    for (i, spec) in specs.iter().enumerate() {
        match *spec {
            WidthSpec::Fixed(w) => {
                widths[i] = w.max(0.0);
                used += widths[i];
            }
            WidthSpec::Percent(p) => {
                widths[i] = (available * p / 100.0).max(0.0);
                used += widths[i];
            }
            WidthSpec::Auto => {
                widths[i] = natural.get(i).copied().unwrap_or(0.0).max(0.0);
                autos.push(i);
            }
            WidthSpec::Star => stars.push(i),
        }
    }

    let remaining = (available - used).max(0.0);
    let auto_total: f32 = autos.iter().map(|&i| widths[i]).sum();
    if auto_total > remaining {
        let scale = remaining / auto_total;
        for &i in &autos {
            widths[i] *= scale;
        }
    }

    if !stars.is_empty() {
        let share = (remaining - auto_total.min(remaining)) / stars.len() as f32;
        for i in stars {
            widths[i] = share;
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_width_forms() {
        assert_eq!(WidthSpec::parse(Some(&json!("*"))), WidthSpec::Star);
        assert_eq!(WidthSpec::parse(Some(&json!("auto"))), WidthSpec::Auto);
        assert_eq!(WidthSpec::parse(Some(&json!("35%"))), WidthSpec::Percent(35.0));
        assert_eq!(WidthSpec::parse(Some(&json!(80))), WidthSpec::Fixed(80.0));
        assert_eq!(WidthSpec::parse(Some(&json!("80"))), WidthSpec::Fixed(80.0));
        assert_eq!(WidthSpec::parse(None), WidthSpec::Star);
    }

    #[test]
    fn stars_share_what_is_left() {
        let specs = [
            WidthSpec::Fixed(100.0),
            WidthSpec::Star,
            WidthSpec::Auto,
            WidthSpec::Star,
        ];
        let widths = distribute(&specs, 500.0, &[0.0, 0.0, 50.0, 0.0]);
        assert_eq!(widths, vec![100.0, 175.0, 50.0, 175.0]);
    }

    #[test]
    fn percentages_use_available_width() {
        let specs = [WidthSpec::Percent(35.0), WidthSpec::Percent(65.0)];
        assert_eq!(distribute(&specs, 200.0, &[]), vec![70.0, 130.0]);
    }

    #[test]
    fn autos_shrink_to_fit() {
        let specs = [WidthSpec::Auto, WidthSpec::Auto, WidthSpec::Star];
        let widths = distribute(&specs, 100.0, &[150.0, 50.0]);
        assert_eq!(widths, vec![75.0, 25.0, 0.0]);
    }
}
