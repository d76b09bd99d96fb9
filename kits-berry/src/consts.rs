//! 通用常量.

/// 病例 ID 中标记左肾的子串. 不含该子串的病例视为右肾.
pub const LEFT_MARKER: &str = "_L";

/// 体积误差比直方图的分箱个数.
pub const RATIO_HISTOGRAM_BINS: usize = 30;

/// 统计图默认分辨率.
pub const REPORT_DPI: u32 = 300;

/// 切片拼图默认分辨率.
pub const SLICE_VIEW_DPI: u32 = 100;

/// 缩放系数的 "最优区间", 在缩放系数散点图上以阴影标出.
pub const OPTIMAL_SCALE_RANGE: (f64, f64) = (1.4, 1.5);

/// 报告输出文件名.
pub mod files {
    /// 体积误差分布总览.
    pub const OVERVIEW: &str = "overview_error_analysis.png";

    /// 几何距离分布.
    pub const GEO_DISTRIBUTION: &str = "geo_distribution.png";

    /// 几何距离与体积误差的回归.
    pub const CORRELATION: &str = "correlation_analysis.png";

    /// 按网络深度分组的平均误差.
    pub const DEPTH: &str = "depth_analysis.png";

    /// 缩放系数与体积误差.
    pub const SCALE: &str = "scale_analysis.png";

    /// 左右肾对比箱线图 (可选).
    pub const SIDE_COMPARISON: &str = "side_comparison.png";

    /// 默认生成的全部图片.
    pub const REPORT_CHARTS: [&str; 5] = [OVERVIEW, GEO_DISTRIBUTION, CORRELATION, DEPTH, SCALE];

    /// 切片拼图默认文件名.
    pub const SLICE_VIEW: &str = "output.png";
}

/// 单色与调色板.
pub mod color {
    /// seaborn 默认蓝.
    pub const DEFAULT_BLUE: (u8, u8, u8) = (76, 114, 176);

    /// skyblue.
    pub const SKY_BLUE: (u8, u8, u8) = (135, 206, 235);

    /// salmon.
    pub const SALMON: (u8, u8, u8) = (250, 128, 114);

    /// 回归线 / 中位数线.
    pub const MARKER_RED: (u8, u8, u8) = (214, 39, 40);

    /// "最优区间" 阴影.
    pub const BAND_GREEN: (u8, u8, u8) = (0, 128, 0);

    /// 深度分组柱状图颜色, 由深到浅.
    pub const BLUES: [(u8, u8, u8); 3] = [(33, 102, 172), (67, 147, 195), (146, 197, 222)];

    /// 左右肾箱线图颜色 (Set2 前两色). 依次为左, 右.
    pub const SET2: [(u8, u8, u8); 2] = [(102, 194, 165), (252, 141, 98)];
}
