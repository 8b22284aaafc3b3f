/// Window-control abstraction the camera stack sizes itself against.
pub trait RenderSurface {
    /// Current inner size in physical pixels.
    fn size(&self) -> (u32, u32);

    /// Whether the surface currently has input focus.
    fn is_focused(&self) -> bool;

    /// Ask for another frame.
    fn request_redraw(&self);
}
