//!
//! # Compact-Model Annotations
//!
//! Circuit-extraction tools read three text labels from each component's device-recognition layer:
//! its compact-model library, its component name, and its SPICE parameters.
//!

// Local imports
use crate::component::Text;
use crate::geom::Vector;
use crate::raw::TextAlign;

/// Layer on which model annotations are placed
pub const MODEL_LAYER: &str = "DevRec";

/// # Spice Parameter Value
#[derive(Debug, Clone, PartialEq)]
pub enum SpiceValue {
    /// A length in micrometers, written with three decimals and a `u` suffix
    Length(f64),
    /// A dimensionless number, written with three decimals
    Num(f64),
    /// Written verbatim
    Raw(String),
}
impl std::fmt::Display for SpiceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Length(v) => write!(f, "{:.3}u", v),
            Self::Num(v) => write!(f, "{:.3}", v),
            Self::Raw(s) => write!(f, "{}", s),
        }
    }
}

/// # Model Information
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelInfo {
    pub library: String,
    pub component: String,
    /// Ordered (name, value) parameter pairs
    pub params: Vec<(String, SpiceValue)>,
    /// Write `NA` for the component and its parameters, keeping only the library
    pub unavailable: bool,
}
impl ModelInfo {
    pub fn new(library: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            component: component.into(),
            params: Vec::new(),
            unavailable: false,
        }
    }
    /// Mark the compact model as not available, chaining
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }
    /// Add a length-valued parameter, chaining
    pub fn length(mut self, name: impl Into<String>, val: f64) -> Self {
        self.params.push((name.into(), SpiceValue::Length(val)));
        self
    }
    /// Add a numeric parameter, chaining
    pub fn num(mut self, name: impl Into<String>, val: f64) -> Self {
        self.params.push((name.into(), SpiceValue::Num(val)));
        self
    }
    /// The `Spice_param:` string. Names containing spaces are quoted.
    pub fn spice(&self) -> String {
        if self.unavailable {
            return "Spice_param: NA".into();
        }
        let params: Vec<String> = self
            .params
            .iter()
            .map(|(name, val)| match name.contains(' ') {
                true => format!("\"{}\"={}", name, val),
                false => format!("{}={}", name, val),
            })
            .collect();
        format!("Spice_param:{}", params.join(" "))
    }
    /// Annotation texts, stacked downward from `loc` in steps of twice `size`
    pub fn texts(&self, loc: Vector, size: f64) -> Vec<Text> {
        let strings = [
            format!("Lumerical_INTERCONNECT_library={}", self.library),
            match self.unavailable {
                true => "Component=NA".into(),
                false => format!("Component={}", self.component),
            },
            self.spice(),
        ];
        strings
            .into_iter()
            .enumerate()
            .map(|(idx, string)| Text {
                layer: MODEL_LAYER.into(),
                string,
                loc: loc - Vector::new(0.0, 2.0 * size * idx as f64),
                size,
                align: TextAlign::Left,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spice_string() {
        let info = ModelInfo::new("Design kits/PRL_PDK", "PRL_arc")
            .num("theta", 90.0)
            .length("radius", 10.0)
            .num("delay compensation", 0.0);
        assert_eq!(
            info.spice(),
            "Spice_param:theta=90.000 radius=10.000u \"delay compensation\"=0.000"
        );
        let texts = info.texts(Vector::new(1.0, 0.0), 0.5);
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[1].string, "Component=PRL_arc");
        assert_eq!(texts[2].loc, Vector::new(1.0, -2.0));
        assert!(texts.iter().all(|t| t.layer == MODEL_LAYER));
    }
    #[test]
    fn unavailable_model() {
        let info = ModelInfo::new("Modulators/Optical", "Optical Ring Modulator")
            .num("loss", 1.0)
            .unavailable();
        let texts = info.texts(Vector::default(), 0.5);
        assert_eq!(texts[0].string, "Lumerical_INTERCONNECT_library=Modulators/Optical");
        assert_eq!(texts[1].string, "Component=NA");
        assert_eq!(texts[2].string, "Spice_param: NA");
    }
}
