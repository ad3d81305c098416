//! Button icons.
//!
//! Icons are addressed by host-relative string paths such as
//! `"000_Toolbar/folder"` and resolved through an [`IconLoader`] the host
//! provides. Decoding textures is the host's business; the engine only needs
//! a handle to pass back to the [`Painter`](crate::Painter) and the pixel
//! size to validate.

use std::sync::Arc;

use crate::error::{IconError, IconResult};
use crate::types::Size;

// ============================================================================
// Icon
// ============================================================================

/// Maximum icon width accepted on a toolbar button.
pub const MAX_ICON_WIDTH: u32 = 24;
/// Maximum icon height accepted on a toolbar button.
pub const MAX_ICON_HEIGHT: u32 = 24;

/// A loaded icon.
///
/// Cheap to clone. `handle` is an opaque host value, for example a texture id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    path: Arc<str>,
    width: u32,
    height: u32,
    handle: u64,
}

impl Icon {
    /// Create an icon for `path` with the given pixel size and host handle.
    pub fn new(path: impl Into<Arc<str>>, width: u32, height: u32, handle: u64) -> Self {
        Self {
            path: path.into(),
            width,
            height,
            handle,
        }
    }

    /// The path this icon was loaded from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Pixel width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel size as a float size.
    pub fn size(&self) -> Size {
        Size::from((self.width, self.height))
    }

    /// The host handle.
    pub fn handle(&self) -> u64 {
        self.handle
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Resolves icon paths to loaded icons.
///
/// Implementations are provided by the host. The engine caches the result
/// per button, so `load` is only called again after the icon path changes.
pub trait IconLoader: Send + Sync {
    /// Load the icon at `path`.
    fn load(&self, path: &str) -> IconResult<Icon>;
}

/// Load an icon and check it against a maximum size.
///
/// Used for toolbar buttons, which reject anything over
/// [`MAX_ICON_WIDTH`]×[`MAX_ICON_HEIGHT`].
pub fn load_bounded(
    loader: &dyn IconLoader,
    path: &str,
    max_width: u32,
    max_height: u32,
) -> IconResult<Icon> {
    let icon = loader.load(path)?;
    if icon.width() > max_width || icon.height() > max_height {
        return Err(IconError::Oversize {
            path: path.to_string(),
            width: icon.width(),
            height: icon.height(),
            max_width,
            max_height,
        });
    }
    Ok(icon)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLoader(u32);

    impl IconLoader for FixedLoader {
        fn load(&self, path: &str) -> IconResult<Icon> {
            if path == "missing" {
                return Err(IconError::NotFound {
                    path: path.to_string(),
                });
            }
            Ok(Icon::new(path, self.0, self.0, 7))
        }
    }

    #[test]
    fn test_load_bounded_accepts_max() {
        let icon = load_bounded(&FixedLoader(24), "a/b", MAX_ICON_WIDTH, MAX_ICON_HEIGHT).unwrap();
        assert_eq!(icon.path(), "a/b");
        assert_eq!(icon.size(), Size::new(24.0, 24.0));
        assert_eq!(icon.handle(), 7);
    }

    #[test]
    fn test_load_bounded_rejects_oversize() {
        let err = load_bounded(&FixedLoader(25), "a/b", MAX_ICON_WIDTH, MAX_ICON_HEIGHT).unwrap_err();
        assert!(matches!(err, IconError::Oversize { width: 25, .. }));
    }

    #[test]
    fn test_load_bounded_propagates_not_found() {
        let err = load_bounded(&FixedLoader(8), "missing", 24, 24).unwrap_err();
        assert_eq!(
            err,
            IconError::NotFound {
                path: "missing".into()
            }
        );
    }
}
