//! 切片查看流水线: 读取分割标签 → 选取切片 → 拼图.

use crate::consts::{files, SLICE_VIEW_DPI};
use crate::data::{ImgWriteVis, SegVolume, VolumeAxis};
use crate::plot::{save_strip, RenderOptions};
use crate::{Idx3d, Result};
use std::io::Write;
use std::path::PathBuf;

/// 默认选取的切片个数.
pub const DEFAULT_NUM_SLICES: usize = 6;

/// 切片查看配置.
#[derive(Clone, Debug, PartialEq)]
pub struct SliceViewConfig {
    /// `.nii` 或 `.nii.gz` 分割标签.
    pub volume: PathBuf,

    /// 沿哪个轴切片.
    pub axis: VolumeAxis,

    /// 切片个数.
    pub num_slices: usize,

    /// 拼图输出路径.
    pub output: PathBuf,

    /// 若给出, 每个切片另存为 `{dump_dir}/{axis}_{下标:04}.png`.
    pub dump_dir: Option<PathBuf>,

    /// 绘图参数.
    pub render: RenderOptions,
}

impl SliceViewConfig {
    /// 沿 z 轴取 6 个切片, 以 100 dpi 写到 `output.png`.
    pub fn new<P: Into<PathBuf>>(volume: P) -> Self {
        Self {
            volume: volume.into(),
            axis: VolumeAxis::default(),
            num_slices: DEFAULT_NUM_SLICES,
            output: PathBuf::from(files::SLICE_VIEW),
            dump_dir: None,
            render: RenderOptions::with_dpi(SLICE_VIEW_DPI),
        }
    }
}

/// 一次切片查看的产出.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SliceView {
    /// 数据形状 `(Z, Y, X)`.
    pub shape: Idx3d,

    /// 出现过的标签值, 升序.
    pub labels: Vec<u8>,

    /// 选中的切片下标.
    pub indices: Vec<usize>,

    /// 单独保存的切片.
    pub dumped: Vec<PathBuf>,
}

/// 在已经加载好的标签上生成拼图, 过程信息写进 `w`.
pub fn render<W: Write>(
    volume: &SegVolume,
    config: &SliceViewConfig,
    w: &mut W,
) -> Result<SliceView> {
    let shape = volume.shape();
    let labels = volume.unique_labels();
    writeln!(w, "Dimension (Z, Y, X): {shape:?}")?;
    writeln!(w, "Unique labels: {labels:?}")?;

    let slices = volume.pick_slices(config.axis, config.num_slices)?;
    let indices: Vec<usize> = slices.iter().map(|(i, _)| *i).collect();
    log::debug!("{} slice(s) along {}: {:?}", slices.len(), config.axis, indices);

    let mut dumped = Vec::new();
    if let Some(dir) = &config.dump_dir {
        std::fs::create_dir_all(dir)?;
        for (index, slice) in &slices {
            let path = dir.join(format!("{}_{index:04}.png", config.axis));
            slice.save(&path)?;
            dumped.push(path);
        }
        log::info!("{} slice(s) dumped into `{}`", dumped.len(), dir.display());
    }

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    save_strip(&config.output, &slices, config.axis, &config.render)?;
    writeln!(w, "Image saved: {}", config.output.display())?;

    Ok(SliceView {
        shape,
        labels,
        indices,
        dumped,
    })
}

/// 完整的切片查看流水线: 读取 `config.volume` 后调用 [`render`].
pub fn run<W: Write>(config: &SliceViewConfig, w: &mut W) -> Result<SliceView> {
    let volume = SegVolume::open(&config.volume)?;
    render(&volume, config, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn volume() -> SegVolume {
        SegVolume::from_array(Array3::from_shape_fn((10, 6, 8), |(z, y, x)| {
            if z > 2 && y > 1 && x > 1 {
                1 + (x % 2) as u8
            } else {
                0
            }
        }))
    }

    fn config(dir: &std::path::Path) -> SliceViewConfig {
        let mut cfg = SliceViewConfig::new(dir.join("unused.nii.gz"));
        cfg.output = dir.join("strip.png");
        cfg.render = RenderOptions {
            dpi: 10,
            labels: false,
        };
        cfg
    }

    #[test]
    fn test_render() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        let mut out = Vec::new();
        let view = render(&volume(), &cfg, &mut out).unwrap();

        assert_eq!(view.shape, (10, 6, 8));
        assert_eq!(view.labels, [0, 1, 2]);
        assert_eq!(view.indices.len(), 6);
        assert_eq!(view.indices[0], 0);
        assert_eq!(view.indices[5], 9);
        assert!(view.dumped.is_empty());

        let img = image::open(&cfg.output).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (150, 50));

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Dimension (Z, Y, X): (10, 6, 8)\n"));
        assert!(text.contains("Unique labels: [0, 1, 2]"));
        assert!(text.trim_end().ends_with("strip.png"));
    }

    #[test]
    fn test_dump_slices() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.axis = VolumeAxis::X;
        cfg.num_slices = 2;
        cfg.dump_dir = Some(dir.path().join("slices"));

        let view = render(&volume(), &cfg, &mut std::io::sink()).unwrap();
        assert_eq!(view.indices, [0, 7]);
        assert_eq!(view.dumped.len(), 2);
        assert!(view.dumped[1].ends_with("x_0007.png"));
        // 沿 x 轴切片形状为 (Z, Y).
        let img = image::open(&view.dumped[0]).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (6, 10));
    }

    #[test]
    fn test_zero_slices() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.num_slices = 0;
        assert!(render(&volume(), &cfg, &mut std::io::sink()).is_err());
        assert!(!cfg.output.exists());
    }

    #[test]
    fn test_missing_volume() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        assert!(matches!(
            run(&cfg, &mut std::io::sink()),
            Err(crate::Error::Nifti(_))
        ));
    }
}
