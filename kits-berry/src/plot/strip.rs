//! 切片拼图: 多个标签切片横向排成一行.

use super::{plot_err, Colormap, RenderOptions};
use crate::data::{LabelSlice, VolumeAxis};
use crate::{Error, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// 拼图的默认尺寸, 以英寸为单位.
pub const STRIP_SIZE: (f64, f64) = (15.0, 5.0);

/// 在 `area` 中居中绘制 `slice`, 保持像素宽高比, 最近邻缩放.
/// 区域为空 (宽或高不为正) 时什么也不画.
fn draw_slice(area: &DrawingArea<BitMapBackend<'_>, Shift>, slice: &LabelSlice) -> Result<()> {
    let (sh, sw) = slice.shape();
    let (xr, yr) = area.get_pixel_range();
    let (aw, ah) = (xr.end - xr.start, yr.end - yr.start);
    if sh == 0 || sw == 0 || aw <= 0 || ah <= 0 {
        return Ok(());
    }

    let scale = (aw as f64 / sw as f64).min(ah as f64 / sh as f64);
    let (dw, dh) = ((sw as f64 * scale) as i32, (sh as f64 * scale) as i32);
    let (ox, oy) = ((aw - dw) / 2, (ah - dh) / 2);

    let rgb = slice.to_rgb(Colormap::NipySpectral);
    for ty in 0..dh {
        let sy = ((ty as f64 / scale) as u32).min(sh as u32 - 1);
        for tx in 0..dw {
            let sx = ((tx as f64 / scale) as u32).min(sw as u32 - 1);
            let [r, g, b] = rgb.get_pixel(sx, sy).0;
            area.draw_pixel((ox + tx, oy + ty), &RGBColor(r, g, b))
                .map_err(plot_err)?;
        }
    }
    Ok(())
}

/// 每个切片四周的留白: 0.05 英寸, 但不超过面板短边的 1/4.
fn panel_margin(panel: &DrawingArea<BitMapBackend<'_>, Shift>, opts: &RenderOptions) -> i32 {
    let (xr, yr) = panel.get_pixel_range();
    let short = (xr.end - xr.start).min(yr.end - yr.start).max(0);
    (opts.px(0.05) as i32).min(short / 4)
}

/// 将 `(下标, 切片)` 依次横向排列, 渲染为一张 RGB 图像.
///
/// 总标题为 `"Segmentation slices along {axis}-axis"`, 每个切片的标题为
/// `"{AXIS} = {下标}"`. 不绘制坐标轴.
pub fn render_strip(
    slices: &[(usize, LabelSlice)],
    axis: VolumeAxis,
    opts: &RenderOptions,
) -> Result<image::RgbImage> {
    if slices.is_empty() {
        return Err(Error::InvalidSliceCount {
            count: 0,
            extent: 0,
        });
    }

    let (w, h) = opts.size(STRIP_SIZE);
    let mut buf = vec![0u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;
        let body = if opts.labels {
            let title = format!("Segmentation slices along {axis}-axis");
            root.titled(&title, ("sans-serif", opts.pt(16.0)))
                .map_err(plot_err)?
        } else {
            root.margin(0, 0, 0, 0)
        };

        for (panel, (index, slice)) in body.split_evenly((1, slices.len())).iter().zip(slices) {
            let margin = panel_margin(panel, opts);
            let panel = panel.margin(margin, margin, margin, margin);
            let area = if opts.labels {
                let title = format!("{} = {}", axis.upper(), index);
                panel.titled(&title, ("sans-serif", opts.pt(12.0)))
                    .map_err(plot_err)?
            } else {
                panel
            };
            draw_slice(&area, slice)?;
        }
        root.present().map_err(plot_err)?;
    }

    image::RgbImage::from_raw(w, h, buf)
        .ok_or_else(|| Error::Plot("pixel buffer does not match image size".to_owned()))
}

/// 渲染拼图并写入 `path`, 已存在的文件会被覆盖.
pub fn save_strip<P: AsRef<Path>>(
    path: P,
    slices: &[(usize, LabelSlice)],
    axis: VolumeAxis,
    opts: &RenderOptions,
) -> Result<()> {
    render_strip(slices, axis, opts)?.save(path.as_ref())?;
    log::info!(
        "composite of {} slice(s) written to `{}`",
        slices.len(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SegVolume;
    use ndarray::Array3;

    fn opts() -> RenderOptions {
        RenderOptions {
            dpi: 20,
            labels: false,
        }
    }

    #[test]
    fn test_render_size() {
        let v = SegVolume::from_array(Array3::from_shape_fn((6, 8, 8), |(z, y, x)| {
            ((z + y + x) % 4) as u8
        }));
        let slices = v.pick_slices(VolumeAxis::Z, 3).unwrap();
        let img = render_strip(&slices, VolumeAxis::Z, &opts()).unwrap();
        assert_eq!(img.dimensions(), (300, 100));
        // 存在非白色像素.
        assert!(img.pixels().any(|p| p.0 != [255, 255, 255]));
    }

    #[test]
    fn test_more_slices_than_pixels() {
        let v = SegVolume::from_array(Array3::from_shape_fn((20, 8, 8), |(z, y, x)| {
            ((z + y * x) % 3) as u8
        }));
        let slices = v.pick_slices(VolumeAxis::Z, 400).unwrap();
        let opts = RenderOptions {
            dpi: 100,
            labels: false,
        };
        let img = render_strip(&slices, VolumeAxis::Z, &opts).unwrap();
        assert_eq!(img.dimensions(), (1500, 500));
        assert!(img.pixels().any(|p| p.0 != [255, 255, 255]));

        // 面板窄于一个像素时同样不会越界.
        let slices = v.pick_slices(VolumeAxis::Z, 2000).unwrap();
        assert!(render_strip(&slices, VolumeAxis::Z, &opts).is_ok());
    }

    #[test]
    fn test_empty_strip() {
        assert!(render_strip(&[], VolumeAxis::X, &opts()).is_err());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strip.png");
        std::fs::write(&path, b"stale").unwrap();

        let v = SegVolume::from_array(Array3::zeros((4, 5, 6)));
        let slices = v.pick_slices(VolumeAxis::X, 2).unwrap();
        save_strip(&path, &slices, VolumeAxis::X, &opts()).unwrap();
        assert_eq!(image::open(&path).unwrap().to_rgb8().dimensions(), (300, 100));
    }
}
