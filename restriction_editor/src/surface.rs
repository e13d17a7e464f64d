use crate::world::Scene;
use crate::{Dispatch, ScreenDims};

pub const CLICK: &str = "click";
pub const HOVER: &str = "mouseover";
pub const LEAVE: &str = "mouseout";

/// The container the editor draws into. The host lays it out and says how big it is; the editor
/// owns what's drawn inside and which pointer handlers are bound.
pub struct Surface {
    in_display_tree: bool,
    measured: ScreenDims,
    // Measuring is expensive for real hosts, so remember the answer until told to forget it.
    cached_dims: Option<ScreenDims>,
    scene: Scene,
    handlers: Dispatch,
    help: String,
}

impl Surface {
    pub fn new(measured: ScreenDims) -> Surface {
        Surface {
            in_display_tree: true,
            measured,
            cached_dims: None,
            scene: Scene::new(),
            handlers: Dispatch::new(),
            help: String::new(),
        }
    }

    pub fn in_display_tree(&self) -> bool {
        self.in_display_tree
    }

    pub fn set_in_display_tree(&mut self, in_tree: bool) {
        self.in_display_tree = in_tree;
    }

    /// The host changed the container's layout. Cached dimensions stay until `forget_dims`.
    pub fn set_measured(&mut self, dims: ScreenDims) {
        self.measured = dims;
    }

    /// The cached size of the surface, measuring it first if needed. Surfaces that haven't been
    /// laid out yet use the fallback instead.
    pub fn dims(&mut self, fallback: ScreenDims) -> ScreenDims {
        if let Some(dims) = self.cached_dims {
            return dims;
        }
        let dims = if self.measured.is_degenerate() {
            debug!(
                "Surface measures {:?}, using {:?} instead",
                self.measured, fallback
            );
            fallback
        } else {
            self.measured
        };
        self.cached_dims = Some(dims);
        dims
    }

    pub fn forget_dims(&mut self) {
        self.cached_dims = None;
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Pointer handlers, by event name
    pub fn handlers(&self) -> &Dispatch {
        &self.handlers
    }

    pub fn handlers_mut(&mut self) -> &mut Dispatch {
        &mut self.handlers
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn set_help(&mut self, help: String) {
        self.help = help;
    }
}
