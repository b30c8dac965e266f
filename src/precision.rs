//! Per-session choice between single and double precision kernels.

use log::{info, warn};

/// Precision the kernels run in for the whole session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precision {
    Single,
    Double,
}

impl Precision {
    /// Decide from the features an adapter reports.
    pub fn from_features(features: wgpu::Features) -> Self {
        if features.contains(wgpu::Features::SHADER_FLOAT64) {
            Precision::Double
        } else {
            Precision::Single
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Precision::Single => "single",
            Precision::Double => "double",
        }
    }
}

/// How [`Precision`] gets picked, as configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrecisionPolicy {
    Auto,
    Single,
    Double,
}

impl PrecisionPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "single" | "f32" => Some(Self::Single),
            "double" | "f64" => Some(Self::Double),
            _ => None,
        }
    }

    /// Resolve the policy, running `probe` only for [`PrecisionPolicy::Auto`].
    pub fn resolve_with(self, probe: impl FnOnce() -> Precision) -> Precision {
        match self {
            PrecisionPolicy::Auto => probe(),
            PrecisionPolicy::Single => Precision::Single,
            PrecisionPolicy::Double => Precision::Double,
        }
    }

    pub fn resolve(self) -> Precision {
        self.resolve_with(probe)
    }
}

/// Query the default accelerator for 64-bit float support.
///
/// Without any adapter the frames are computed and shown on the CPU alone,
/// which handles doubles at full speed.
pub fn probe() -> Precision {
    let instance = wgpu::Instance::new(wgpu::Backends::all());

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        force_fallback_adapter: false,
        compatible_surface: None,
    }));

    match adapter {
        Some(adapter) => {
            info!("adapter: {:?}", adapter.get_info());
            let precision = Precision::from_features(adapter.features());
            info!("adapter selects {} precision", precision.as_str());
            precision
        }
        None => {
            warn!("no adapter found; using double precision on the CPU");
            Precision::Double
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f64_feature_selects_double() {
        assert_eq!(
            Precision::from_features(wgpu::Features::SHADER_FLOAT64),
            Precision::Double
        );
        assert_eq!(
            Precision::from_features(wgpu::Features::empty()),
            Precision::Single
        );
    }

    #[test]
    fn fixed_policies_never_probe() {
        let picked = PrecisionPolicy::Single.resolve_with(|| panic!("probed"));
        assert_eq!(picked, Precision::Single);
        let picked = PrecisionPolicy::Double.resolve_with(|| panic!("probed"));
        assert_eq!(picked, Precision::Double);
        let picked = PrecisionPolicy::Auto.resolve_with(|| Precision::Single);
        assert_eq!(picked, Precision::Single);
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!(PrecisionPolicy::parse(" AUTO "), Some(PrecisionPolicy::Auto));
        assert_eq!(PrecisionPolicy::parse("f32"), Some(PrecisionPolicy::Single));
        assert_eq!(PrecisionPolicy::parse("double"), Some(PrecisionPolicy::Double));
        assert_eq!(PrecisionPolicy::parse("quad"), None);
    }
}
