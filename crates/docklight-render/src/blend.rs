//! Blend modes supported by the rasterizer.

/// How a source pixel is combined with the surface.
///
/// All arithmetic happens on premultiplied colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// No blending - source completely replaces destination.
    Replace,

    /// Source-over compositing.
    ///
    /// Formula: `src + dst * (1 - src.a)`
    #[default]
    Alpha,

    /// Colors are added together, alpha saturates.
    ///
    /// Use for: glows and highlights.
    Additive,
}

impl BlendMode {
    /// Combine premultiplied `src` onto premultiplied `dst`.
    #[inline]
    pub(crate) fn apply(self, src: [f32; 4], dst: [f32; 4]) -> [f32; 4] {
        match self {
            BlendMode::Replace => src,
            BlendMode::Alpha => {
                let inv = 1.0 - src[3];
                [
                    src[0] + dst[0] * inv,
                    src[1] + dst[1] * inv,
                    src[2] + dst[2] * inv,
                    src[3] + dst[3] * inv,
                ]
            }
            BlendMode::Additive => [
                (src[0] + dst[0]).min(1.0),
                (src[1] + dst[1]).min(1.0),
                (src[2] + dst[2]).min(1.0),
                (src[3] + dst[3]).min(1.0),
            ],
        }
    }
}
