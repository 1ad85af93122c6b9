use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn landscape(self) -> Self {
        if self.width >= self.height {
            self
        } else {
            Self::new(self.height, self.width)
        }
    }
}

/// Page and box margins in points, in `[left, top, right, bottom]` order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Reads the three accepted margin shapes: a single number, `[horizontal, vertical]`
    /// or `[left, top, right, bottom]`.
    pub fn from_value(value: &Value) -> Option<Margins> {
        match value {
            Value::Number(n) => n.as_f64().map(|v| Margins::uniform(v as f32)),
            Value::Array(items) => {
                let nums: Option<Vec<f32>> =
                    items.iter().map(|v| v.as_f64().map(|f| f as f32)).collect();
                match nums?.as_slice() {
                    [h, v] => Some(Margins::new(*h, *v, *h, *v)),
                    [l, t, r, b] => Some(Margins::new(*l, *t, *r, *b)),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Named paper sizes, in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
}

impl PageSize {
    pub fn from_name(name: &str) -> Option<PageSize> {
        match name.trim().to_ascii_uppercase().as_str() {
            "A3" => Some(PageSize::A3),
            "A4" => Some(PageSize::A4),
            "A5" => Some(PageSize::A5),
            "LETTER" => Some(PageSize::Letter),
            "LEGAL" => Some(PageSize::Legal),
            _ => None,
        }
    }

    pub fn size(self) -> Size {
        match self {
            PageSize::A3 => Size::new(841.89, 1190.55),
            PageSize::A4 => Size::new(595.28, 841.89),
            PageSize::A5 => Size::new(419.53, 595.28),
            PageSize::Letter => Size::new(612.0, 792.0),
            PageSize::Legal => Size::new(612.0, 1008.0),
        }
    }

    /// Resolves a `pageSize` value: a paper name or an explicit `{width, height}` object.
    pub fn resolve(value: &Value) -> Option<Size> {
        match value {
            Value::String(name) => PageSize::from_name(name).map(PageSize::size),
            Value::Object(map) => {
                let width = map.get("width")?.as_f64()? as f32;
                let height = map.get("height")?.as_f64()? as f32;
                Some(Size::new(width, height))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn margins_accept_all_shapes() {
        assert_eq!(Margins::from_value(&json!(10)), Some(Margins::uniform(10.0)));
        assert_eq!(
            Margins::from_value(&json!([40, 20])),
            Some(Margins::new(40.0, 20.0, 40.0, 20.0))
        );
        assert_eq!(
            Margins::from_value(&json!([40, 80, 40, 80])),
            Some(Margins::new(40.0, 80.0, 40.0, 80.0))
        );
        assert_eq!(Margins::from_value(&json!([1, 2, 3])), None);
        assert_eq!(Margins::from_value(&json!("wide")), None);
    }

    #[test]
    fn page_size_resolution() {
        assert_eq!(PageSize::resolve(&json!("a4")), Some(PageSize::A4.size()));
        assert_eq!(
            PageSize::resolve(&json!({"width": 300, "height": 400})),
            Some(Size::new(300.0, 400.0))
        );
        assert_eq!(PageSize::resolve(&json!("B7")), None);
    }

    #[test]
    fn landscape_swaps_portrait_only() {
        let a4 = PageSize::A4.size();
        assert_eq!(a4.landscape(), Size::new(a4.height, a4.width));
        assert_eq!(a4.landscape().landscape(), a4.landscape());
    }
}
