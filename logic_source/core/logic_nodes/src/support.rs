/// Whether velocity commands reach physics bodies.
///
/// The default follows the `physics` cargo feature; a runtime request can turn
/// support off, but cannot turn it on in a build compiled without it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhysicsSupport {
    Enabled,
    Disabled,
}

impl PhysicsSupport {
    pub const COMPILED: bool = cfg!(feature = "physics");

    pub fn resolve(requested: Option<bool>) -> Self {
        match requested {
            None => Self::default(),
            Some(false) => PhysicsSupport::Disabled,
            Some(true) if Self::COMPILED => PhysicsSupport::Enabled,
            Some(true) => {
                log::warn!("physics support requested but not compiled in; velocity nodes will only continue the chain");
                PhysicsSupport::Disabled
            }
        }
    }

    /// False in a build without the `physics` feature, whatever was requested.
    #[inline]
    pub const fn is_enabled(self) -> bool {
        Self::COMPILED && matches!(self, PhysicsSupport::Enabled)
    }
}

impl Default for PhysicsSupport {
    fn default() -> Self {
        if Self::COMPILED {
            PhysicsSupport::Enabled
        } else {
            PhysicsSupport::Disabled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_disable_wins() {
        assert_eq!(PhysicsSupport::resolve(Some(false)), PhysicsSupport::Disabled);
    }

    #[test]
    fn unset_follows_build() {
        assert_eq!(PhysicsSupport::resolve(None), PhysicsSupport::default());
        assert_eq!(PhysicsSupport::default().is_enabled(), PhysicsSupport::COMPILED);
    }

    #[cfg(feature = "physics")]
    #[test]
    fn enable_in_physics_build() {
        assert_eq!(PhysicsSupport::resolve(Some(true)), PhysicsSupport::Enabled);
    }

    #[cfg(not(feature = "physics"))]
    #[test]
    fn enable_without_physics_build_stays_off() {
        assert_eq!(PhysicsSupport::resolve(Some(true)), PhysicsSupport::Disabled);
        assert!(!PhysicsSupport::Enabled.is_enabled());
    }
}
