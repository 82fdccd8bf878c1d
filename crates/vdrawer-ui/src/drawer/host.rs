/// The layout collaborator that owns the actual drawer surface.
///
/// Methods take `&self`; hosts keep their own interior mutability. They are
/// called after the drawer has released its internal state, so a host may
/// query the drawer from inside a callback.
pub trait DrawerHost {
    /// Moves the drawer's top edge to `top` without reflowing content.
    fn set_drawer_top(&self, top: f32);

    /// Asks for a new geometry pass, e.g. after the peek height changed.
    fn request_layout(&self) {}
}
