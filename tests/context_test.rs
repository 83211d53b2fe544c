use weld::{
    context::{depth_stencil_support, preferred_surface_format},
    data_structures::texture::Texture,
};
use wgpu::{Features, TextureFormat};

#[test]
fn prefers_bgra_srgb() {
    let formats = [
        TextureFormat::Rgba8Unorm,
        TextureFormat::Rgba8UnormSrgb,
        TextureFormat::Bgra8UnormSrgb,
    ];
    assert_eq!(preferred_surface_format(&formats), Some(TextureFormat::Bgra8UnormSrgb));
}

#[test]
fn falls_back_to_any_srgb_then_the_first_format() {
    let srgb = [TextureFormat::Rgba8Unorm, TextureFormat::Rgba8UnormSrgb];
    assert_eq!(preferred_surface_format(&srgb), Some(TextureFormat::Rgba8UnormSrgb));

    let linear = [TextureFormat::Rgba16Float, TextureFormat::Bgra8Unorm];
    assert_eq!(preferred_surface_format(&linear), Some(TextureFormat::Rgba16Float));

    assert_eq!(preferred_surface_format(&[]), None);
}

#[test]
fn depth32_stencil8_needs_the_feature() {
    let (features, format) = depth_stencil_support(Features::DEPTH32FLOAT_STENCIL8);
    assert_eq!(features, Features::DEPTH32FLOAT_STENCIL8);
    assert_eq!(format, Texture::DEPTH_STENCIL_FORMAT);

    let (features, format) = depth_stencil_support(Features::empty());
    assert!(features.is_empty());
    assert_eq!(format, Texture::FALLBACK_DEPTH_STENCIL_FORMAT);
    assert!(format.has_stencil_aspect());
}
