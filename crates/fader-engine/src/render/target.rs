use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TARGET_ID: AtomicU64 = AtomicU64::new(1);

/// Off-screen color + depth attachment pair, sampled later as a texture.
///
/// Every (re)allocation gets a fresh `id`, so passes that cache bind groups
/// over the color view can tell when the view changed.
pub struct OffscreenTarget {
    id: u64,
    size: (u32, u32),
    label: String,
    attachments: Attachments,
}

struct Attachments {
    _color: wgpu::Texture,
    _depth: wgpu::Texture,
    color_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
}

impl OffscreenTarget {
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub fn new(device: &wgpu::Device, size: (u32, u32), label: impl Into<String>) -> Self {
        let label = label.into();
        let size = (size.0.max(1), size.1.max(1));
        let attachments = allocate(device, size, &label);
        Self {
            id: NEXT_TARGET_ID.fetch_add(1, Ordering::Relaxed),
            size,
            label,
            attachments,
        }
    }

    /// Reallocates the attachments if `size` differs from the current one.
    ///
    /// Returns `true` when a reallocation happened.
    pub fn ensure_size(&mut self, device: &wgpu::Device, size: (u32, u32)) -> bool {
        let size = (size.0.max(1), size.1.max(1));
        if size == self.size {
            return false;
        }

        self.attachments = allocate(device, size, &self.label);
        self.size = size;
        self.id = NEXT_TARGET_ID.fetch_add(1, Ordering::Relaxed);
        log::debug!("resized target '{}' to {}x{}", self.label, size.0, size.1);
        true
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn color_view(&self) -> &wgpu::TextureView {
        &self.attachments.color_view
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.attachments.depth_view
    }
}

fn allocate(
    device: &wgpu::Device,
    (width, height): (u32, u32),
    label: &str,
) -> Attachments {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let color = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: OffscreenTarget::COLOR_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });

    let depth = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(&format!("{label} depth")),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: OffscreenTarget::DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });

    Attachments {
        color_view: color.create_view(&wgpu::TextureViewDescriptor::default()),
        depth_view: depth.create_view(&wgpu::TextureViewDescriptor::default()),
        _color: color,
        _depth: depth,
    }
}
