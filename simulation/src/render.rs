use crate::body::Body;

use fxhash::{FxHashMap, FxHashSet};
use quadtree::QuadTree;
use tracing::warn;

/// Tag used to pick a drawing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderKind {
    Ball,
    QuadTree,
}

/// Something the render layer can draw, borrowed from the simulation.
#[derive(Debug, Clone, Copy)]
pub enum Drawable<'a> {
    Ball(&'a Body),
    // Node outlines, for debugging the broad phase.
    QuadTree(&'a QuadTree),
}

impl Drawable<'_> {
    pub fn kind(&self) -> RenderKind {
        match self {
            Drawable::Ball(body) => body.kind(),
            Drawable::QuadTree(_) => RenderKind::QuadTree,
        }
    }
}

/// A drawing strategy targeting some surface `S`.
pub trait Renderer<S> {
    fn draw(&mut self, surface: &mut S, drawable: &Drawable<'_>);
}

impl<S, F> Renderer<S> for F
where
    F: FnMut(&mut S, &Drawable<'_>),
{
    fn draw(&mut self, surface: &mut S, drawable: &Drawable<'_>) {
        self(surface, drawable)
    }
}

pub struct RendererRegistry<S> {
    renderers: FxHashMap<RenderKind, Box<dyn Renderer<S>>>,
    warned: FxHashSet<RenderKind>,
}

impl<S> Default for RendererRegistry<S> {
    fn default() -> Self {
        Self {
            renderers: FxHashMap::default(),
            warned: FxHashSet::default(),
        }
    }
}

impl<S> RendererRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    // Returns the strategy previously registered for `kind`, if any.
    pub fn register<R>(&mut self, kind: RenderKind, renderer: R) -> Option<Box<dyn Renderer<S>>>
    where
        R: Renderer<S> + 'static,
    {
        self.renderers.insert(kind, Box::new(renderer))
    }

    pub fn is_registered(&self, kind: RenderKind) -> bool {
        self.renderers.contains_key(&kind)
    }

    /// Draws every drawable with the strategy registered for its kind. Drawables without
    /// one are skipped. Returns how many were drawn.
    pub fn render<'a, I>(&mut self, surface: &mut S, drawables: I) -> usize
    where
        I: IntoIterator<Item = Drawable<'a>>,
    {
        let mut drawn = 0;
        for drawable in drawables {
            let kind = drawable.kind();
            match self.renderers.get_mut(&kind) {
                Some(renderer) => {
                    renderer.draw(surface, &drawable);
                    drawn += 1;
                }
                None => {
                    if self.warned.insert(kind) {
                        warn!(?kind, "no renderer registered, skipping");
                    }
                }
            }
        }
        drawn
    }
}
