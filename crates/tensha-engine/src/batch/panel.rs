use crate::camera::Camera;
use crate::coords::{CoordinateMapper, ScreenRect, Vec2, Viewport};
use crate::error::BatchError;
use crate::mesh::{Batch, BatchMeshBuilder};
use crate::params::{ParameterBinder, PropertyBlock, PropertySet, VisualColumns};

use super::{DrawSubmission, MaterialRef, RenderBackend, DEFAULT_LAYER_MASK};

/// One batch of SDF panels drawn with a single call.
///
/// Rects, visuals, mesh quads and property arrays share one primitive index.
/// Geometry is rebuilt only when a rect, an outline input or the viewport changed;
/// dynamic parameters are re-pushed every frame.
///
/// Updates are all-or-nothing: a failing [`prepare`](Self::prepare) leaves the
/// previous mesh and property block untouched.
#[derive(Debug)]
pub struct PanelBatch {
    material: MaterialRef,
    layer_mask: u32,

    rects: Vec<ScreenRect>,
    visuals: VisualColumns,

    mesh: Batch,
    properties: PropertySet,
    block: PropertyBlock,

    built_for: Option<Viewport>,
    geometry_dirty: bool,
    static_dirty: bool,
    rebuilds: u64,
}

impl PanelBatch {
    /// Creates a batch. Nothing is built until the first [`prepare`](Self::prepare).
    pub fn new(material: MaterialRef, rects: Vec<ScreenRect>, visuals: VisualColumns) -> Result<Self, BatchError> {
        check_aligned(&rects, &visuals)?;

        Ok(Self {
            material,
            layer_mask: DEFAULT_LAYER_MASK,
            rects,
            visuals,
            mesh: Batch::new(),
            properties: PropertySet::default(),
            block: PropertyBlock::new(),
            built_for: None,
            geometry_dirty: true,
            static_dirty: true,
            rebuilds: 0,
        })
    }

    pub fn with_layer_mask(mut self, layer_mask: u32) -> Self {
        self.layer_mask = layer_mask;
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    #[inline]
    pub fn material(&self) -> MaterialRef {
        self.material
    }

    #[inline]
    pub fn rects(&self) -> &[ScreenRect] {
        &self.rects
    }

    #[inline]
    pub fn visuals(&self) -> &VisualColumns {
        &self.visuals
    }

    /// Direct column access. Marks everything stale; lengths are checked on the
    /// next [`prepare`](Self::prepare).
    pub fn visuals_mut(&mut self) -> &mut VisualColumns {
        self.geometry_dirty = true;
        self.static_dirty = true;
        &mut self.visuals
    }

    /// Last successfully built mesh.
    #[inline]
    pub fn mesh(&self) -> &Batch {
        &self.mesh
    }

    /// Last successfully bound parameters.
    #[inline]
    pub fn properties(&self) -> &PropertySet {
        &self.properties
    }

    /// Shader-facing store passed to the backend.
    #[inline]
    pub fn property_block(&self) -> &PropertyBlock {
        &self.block
    }

    #[inline]
    pub fn is_geometry_dirty(&self) -> bool {
        self.geometry_dirty
    }

    /// Number of mesh rebuilds so far.
    #[inline]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Replaces every primitive at once.
    pub fn replace(&mut self, rects: Vec<ScreenRect>, visuals: VisualColumns) -> Result<(), BatchError> {
        check_aligned(&rects, &visuals)?;
        self.rects = rects;
        self.visuals = visuals;
        self.geometry_dirty = true;
        self.static_dirty = true;
        Ok(())
    }

    pub fn set_rect(&mut self, index: usize, rect: ScreenRect) -> Result<(), BatchError> {
        let len = self.rects.len();
        let slot = self.rects.get_mut(index).ok_or(BatchError::PrimitiveOutOfRange { index, len })?;
        if *slot != rect {
            *slot = rect;
            self.geometry_dirty = true;
        }
        Ok(())
    }

    pub fn set_outline_width(&mut self, index: usize, width_px: f32) -> Result<(), BatchError> {
        let len = self.visuals.len();
        let slot = self
            .visuals
            .outline_width_px
            .get_mut(index)
            .ok_or(BatchError::PrimitiveOutOfRange { index, len })?;
        if *slot != width_px {
            *slot = width_px;
            self.geometry_dirty = true;
        }
        Ok(())
    }

    pub fn set_outline_direction(&mut self, index: usize, direction: f32) -> Result<(), BatchError> {
        let len = self.visuals.len();
        let slot = self
            .visuals
            .outline_direction
            .get_mut(index)
            .ok_or(BatchError::PrimitiveOutOfRange { index, len })?;
        if *slot != direction {
            *slot = direction;
            self.geometry_dirty = true;
        }
        Ok(())
    }

    /// Cell size only feeds the shader, so the mesh stays valid.
    pub fn set_sdf_cell_size(&mut self, index: usize, size_px: Vec2) -> Result<(), BatchError> {
        let len = self.visuals.len();
        let slot = self
            .visuals
            .sdf_cell_size_px
            .get_mut(index)
            .ok_or(BatchError::PrimitiveOutOfRange { index, len })?;
        *slot = size_px;
        Ok(())
    }

    /// Brings mesh and property block up to date for `viewport`.
    ///
    /// Everything fallible runs before anything is committed.
    pub fn prepare(&mut self, viewport: Viewport) -> Result<(), BatchError> {
        let mapper = CoordinateMapper::new(viewport)?;
        let viewport_changed = self.built_for != Some(viewport);

        let properties = ParameterBinder::new(mapper).bind(&self.visuals)?;

        let mesh = if self.geometry_dirty || viewport_changed {
            let outlines = self.visuals.outline_expansions();
            Some(BatchMeshBuilder::new(mapper).build(&self.rects, &outlines)?)
        } else {
            None
        };

        if let Some(mesh) = mesh {
            log::debug!(
                "rebuilt panel mesh: {} primitives (viewport {}x{})",
                mesh.primitive_count(),
                viewport.pixel_width,
                viewport.pixel_height
            );
            self.mesh = mesh;
            self.geometry_dirty = false;
            self.rebuilds += 1;
        }

        // Radii and padding are stored in world units, so a new scale re-pushes them.
        if self.static_dirty || viewport_changed {
            ParameterBinder::push_static(&properties, &mut self.block);
            self.static_dirty = false;
        }
        ParameterBinder::push_dynamic(&properties, &mut self.block);

        self.properties = properties;
        self.built_for = Some(viewport);
        Ok(())
    }

    /// Runs one frame: prepare against the camera's viewport, then submit one draw.
    ///
    /// On error nothing is submitted and the previous state is kept; the caller
    /// should skip the frame. Empty batches submit nothing.
    pub fn frame<B: RenderBackend + ?Sized>(&mut self, camera: &Camera, backend: &mut B) -> Result<(), BatchError> {
        if let Err(err) = self.prepare(camera.viewport()) {
            log::warn!("skipping panel draw: {err}");
            return Err(err);
        }

        if self.mesh.is_empty() {
            return Ok(());
        }

        backend.submit(DrawSubmission {
            mesh: &self.mesh,
            material: self.material,
            properties: &self.block,
            transform: camera.draw_transform(),
            layer_mask: self.layer_mask,
        });
        Ok(())
    }
}

fn check_aligned(rects: &[ScreenRect], visuals: &VisualColumns) -> Result<(), BatchError> {
    let n = visuals.validate()?;
    if rects.len() != n {
        return Err(BatchError::ShapeMismatch { rects: rects.len(), outlines: n });
    }
    Ok(())
}
