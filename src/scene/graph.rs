//! Arena that owns every shape and the tree links between them.
//!
//! A shape is owned by at most one parent and appears at most once in that parent's child list.
//! Edges that would close a cycle are rejected before anything is modified.

use std::collections::HashMap;
use std::fmt;

use crate::foundation::core::Point;
use crate::foundation::error::{ProgError, ProgResult};
use crate::geometry::transform::Transform;
use crate::render::backend::Renderer;
use crate::scene::shape::Shape;

/// Handle to a shape inside a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(usize);

impl ShapeId {
    /// Position in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shape tree storage.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// `true` when no shape has been inserted.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Take ownership of a shape as a new root and compute its global transform.
    pub fn insert(&mut self, mut shape: Shape) -> ShapeId {
        let id = ShapeId(self.shapes.len());
        shape.children.clear();
        shape.parent = None;
        let parent = shape.parent_transform;
        self.shapes.push(shape);
        self.propagate(id, parent);
        id
    }

    /// Insert a shape together with its initial children.
    ///
    /// Children are validated first; nothing is inserted when one is invalid. Repeated ids are
    /// kept once.
    pub fn insert_with_children(
        &mut self,
        shape: Shape,
        children: &[ShapeId],
    ) -> ProgResult<ShapeId> {
        for &child in children {
            self.node(child)?;
        }
        let id = self.insert(shape);
        self.add(id, children)?;
        Ok(id)
    }

    /// Borrow a shape.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0)
    }

    /// Mutably borrow a shape. Call [`Scene::refresh_transform`] after changing its transform.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id.0)
    }

    /// Ids of shapes without a parent, in insertion order.
    pub fn roots(&self) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.parent.is_none())
            .map(|(i, _)| ShapeId(i))
            .collect()
    }

    fn node(&self, id: ShapeId) -> ProgResult<&Shape> {
        self.shapes
            .get(id.0)
            .ok_or_else(|| ProgError::invalid_shape(format!("{id} is not a shape of this scene")))
    }

    /// Check that `candidate` may become a child of `parent`.
    ///
    /// Fails with [`ProgError::InvalidShape`] for unknown ids and [`ProgError::CycleDetected`]
    /// when `parent` is `candidate` or one of its descendants.
    pub fn validate_child(&self, parent: ShapeId, candidate: ShapeId) -> ProgResult<()> {
        self.node(parent)?;
        self.node(candidate)?;
        let mut stack = vec![candidate];
        while let Some(id) = stack.pop() {
            if id == parent {
                return Err(ProgError::cycle(format!(
                    "adding {candidate} under {parent} would make the tree contain itself"
                )));
            }
            stack.extend(self.shapes[id.0].children.iter().copied());
        }
        Ok(())
    }

    /// Append children to `parent` and re-propagate transforms from `parent`.
    ///
    /// Every child is validated before any edge is inserted. Children already under `parent` are
    /// skipped; children owned by another shape are moved.
    #[tracing::instrument(skip(self))]
    pub fn add(&mut self, parent: ShapeId, children: &[ShapeId]) -> ProgResult<()> {
        for &child in children {
            self.validate_child(parent, child)?;
        }
        for &child in children {
            if self.shapes[parent.0].children.contains(&child) {
                continue;
            }
            if let Some(old) = self.shapes[child.0].parent {
                self.shapes[old.0].children.retain(|&c| c != child);
            }
            self.shapes[child.0].parent = Some(parent);
            self.shapes[parent.0].children.push(child);
        }
        self.refresh_transform(parent)
    }

    /// Detach children from `parent`; they become roots. Absent children are ignored.
    pub fn remove(&mut self, parent: ShapeId, children: &[ShapeId]) -> ProgResult<()> {
        self.node(parent)?;
        for &child in children {
            let list = &mut self.shapes[parent.0].children;
            let Some(pos) = list.iter().position(|&c| c == child) else {
                continue;
            };
            list.remove(pos);
            self.shapes[child.0].parent = None;
        }
        Ok(())
    }

    /// Deep-copy `root` and its descendants. The copy is a new root with the same stored
    /// parent transform; the original is left untouched.
    pub fn copy_subtree(&mut self, root: ShapeId) -> ProgResult<ShapeId> {
        let ids = self.flatten(root)?;
        let base = self.shapes.len();
        let mapping: HashMap<ShapeId, ShapeId> = ids
            .iter()
            .enumerate()
            .map(|(i, &old)| (old, ShapeId(base + i)))
            .collect();
        for &old in &ids {
            let mut shape = self.shapes[old.0].clone();
            shape.children = shape.children.iter().map(|c| mapping[c]).collect();
            shape.parent = if old == root {
                None
            } else {
                shape.parent.map(|p| mapping[&p])
            };
            self.shapes.push(shape);
        }
        let copy = ShapeId(base);
        self.refresh_transform(copy)?;
        Ok(copy)
    }

    /// `root` and all of its descendants, pre-order, left to right.
    pub fn flatten(&self, root: ShapeId) -> ProgResult<Vec<ShapeId>> {
        self.node(root)?;
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.shapes[id.0].children.iter().rev().copied());
        }
        Ok(out)
    }

    /// Store `parent_transform` on `id` and recompute global transforms of the subtree.
    ///
    /// The global transform is the local one followed by the parent's, the parent's alone when
    /// there is no local transform, and the identity when there is neither.
    pub fn update_transform(
        &mut self,
        id: ShapeId,
        parent_transform: Option<Transform>,
    ) -> ProgResult<()> {
        self.node(id)?;
        self.propagate(id, parent_transform);
        Ok(())
    }

    /// Recompute the subtree of `id` with its stored parent transform.
    pub fn refresh_transform(&mut self, id: ShapeId) -> ProgResult<()> {
        let parent = self.node(id)?.parent_transform;
        self.propagate(id, parent);
        Ok(())
    }

    fn propagate(&mut self, id: ShapeId, parent_transform: Option<Transform>) {
        let mut stack = vec![(id, parent_transform)];
        while let Some((id, parent)) = stack.pop() {
            let shape = &mut self.shapes[id.0];
            shape.parent_transform = parent;
            shape.global_transform = match (shape.transform, parent) {
                (Some(local), Some(parent)) => {
                    let mut global = local;
                    global.merge(&parent);
                    global
                }
                (Some(local), None) => local,
                (None, Some(parent)) => parent,
                (None, None) => Transform::IDENTITY,
            };
            let global = shape.global_transform;
            stack.extend(shape.children.iter().map(|&c| (c, Some(global))));
        }
    }

    /// Draw `root` and its subtree, pre-order.
    ///
    /// Each shape's draw state is pushed before its own primitive and children are drawn, and
    /// popped afterwards, so siblings never see each other's state.
    pub fn draw<R: Renderer + ?Sized>(&self, root: ShapeId, renderer: &mut R) -> ProgResult<()> {
        let shape = self.node(root)?;
        renderer.push_state(&shape.draw_state());
        let result = self.draw_contents(shape, renderer);
        renderer.pop_state();
        result
    }

    fn draw_contents<R: Renderer + ?Sized>(
        &self,
        shape: &Shape,
        renderer: &mut R,
    ) -> ProgResult<()> {
        if let Some(primitive) = shape.kind.primitive() {
            renderer.draw(&primitive)?;
        }
        for &child in &shape.children {
            self.draw(child, renderer)?;
        }
        Ok(())
    }

    /// Split every cubic of every path shape under `root` into `count` pieces.
    pub fn subdivide(&mut self, root: ShapeId, count: usize) -> ProgResult<()> {
        if count <= 1 {
            return self.node(root).map(|_| ());
        }
        for id in self.flatten(root)? {
            if let Some(v) = self.shapes[id.0].kind.vshape_mut() {
                v.subdivide(count);
            }
        }
        Ok(())
    }

    /// Move every anchor of every path shape under `root` through `f`, then re-smooth.
    ///
    /// All new paths are computed before any is stored; on error the tree is unchanged.
    pub fn transform_nonlinear(
        &mut self,
        root: ShapeId,
        mut f: impl FnMut(Point) -> Point,
    ) -> ProgResult<()> {
        let mut staged = Vec::new();
        for id in self.flatten(root)? {
            if let Some(v) = self.shapes[id.0].kind.vshape() {
                staged.push((id, v.mapped_path(&mut f)?));
            }
        }
        for (id, path) in staged {
            if let Some(v) = self.shapes[id.0].kind.vshape_mut() {
                v.replace_path(path);
            }
        }
        Ok(())
    }

    /// [`Scene::transform_nonlinear`] with the coordinates passed as separate arguments.
    pub fn transform_nonlinear_xy(
        &mut self,
        root: ShapeId,
        mut f: impl FnMut(f64, f64) -> (f64, f64),
    ) -> ProgResult<()> {
        self.transform_nonlinear(root, |p| {
            let (x, y) = f(p.x, p.y);
            Point::new(x, y)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
