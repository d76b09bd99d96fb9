//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{Error, Idx2d, Idx3d, Result};

pub use crate::data::{ImgWriteVis, LabelSlice, NiftiHeaderAttr, SegVolume, VolumeAxis};
pub use crate::table::{CaseRecord, CaseTable, Metric, Side, TableSchema};

pub use crate::stats::{DepthGroup, GroupMeans, SideComparison, Summary};

pub use crate::plot::{Colormap, RenderOptions};

pub use crate::report::{MetricsSummary, ReportConfig};
pub use crate::viewer::SliceViewConfig;

pub use crate::dataset::{self, home_dataset_dir_with, home_segmentation_path};
