//! Attribute/uniform location resolution.

use crate::context::GlContext;
use crate::program::Program;
use crate::shaders::{ATTR_POSITION, UNIFORM_KOLOR, UNIFORM_MVP};

/// Resolved binding locations for one specific program.
///
/// Valid only for the program it was resolved against; a different program
/// needs a fresh [`BindingTable::resolve`]. A name absent from the program's
/// reflection data resolves to `None`; the draw call treats that location as
/// a silent no-op, so a misspelled shader variable shows up as a blank or
/// uncolored cube rather than an error.
pub struct BindingTable<G: GlContext> {
    pub program: G::Program,
    pub position: Option<u32>,
    pub mvp: Option<G::Location>,
    pub kolor: Option<G::Location>,
}

impl<G: GlContext> BindingTable<G> {
    /// Looks up the fixed attribute/uniform names on a linked program.
    ///
    /// Makes the program current first; some backends require that for
    /// location queries. No other GPU state is touched.
    pub fn resolve(gl: &G, program: &Program<G>) -> Self {
        let raw = program.raw();
        gl.use_program(Some(raw));
        Self {
            program: raw,
            position: gl.attrib_location(raw, ATTR_POSITION),
            mvp: gl.uniform_location(raw, UNIFORM_MVP),
            kolor: gl.uniform_location(raw, UNIFORM_KOLOR),
        }
    }
}

impl<G: GlContext> Clone for BindingTable<G> {
    fn clone(&self) -> Self {
        Self {
            program: self.program,
            position: self.position,
            mvp: self.mvp.clone(),
            kolor: self.kolor.clone(),
        }
    }
}
