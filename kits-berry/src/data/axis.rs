use crate::Error;
use ndarray::Axis;
use std::fmt;
use std::str::FromStr;

/// 切片方向. 体数据按 `(Z, Y, X)` 存储.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum VolumeAxis {
    /// 固定 x, 得到 `(Z, Y)` 切片.
    X,

    /// 固定 y, 得到 `(Z, X)` 切片.
    Y,

    /// 固定 z, 得到 `(Y, X)` 切片.
    #[default]
    Z,
}

impl VolumeAxis {
    /// 在 `(Z, Y, X)` 数组中对应的维度.
    #[inline]
    pub const fn index(&self) -> usize {
        match self {
            Self::Z => 0,
            Self::Y => 1,
            Self::X => 2,
        }
    }

    /// `ndarray` 维度.
    #[inline]
    pub const fn ndarray_axis(&self) -> Axis {
        Axis(self.index())
    }

    /// 小写名称, 即命令行中的写法.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }

    /// 大写名称, 用于切片标题.
    #[inline]
    pub const fn upper(&self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }
}

impl fmt::Display for VolumeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 只接受小写的 `x`, `y`, `z`.
impl FromStr for VolumeAxis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            other => Err(Error::InvalidAxis(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("x".parse::<VolumeAxis>().unwrap(), VolumeAxis::X);
        assert_eq!("y".parse::<VolumeAxis>().unwrap(), VolumeAxis::Y);
        assert_eq!("z".parse::<VolumeAxis>().unwrap(), VolumeAxis::Z);
        for bad in ["w", "Z", "", " z", "xy"] {
            assert!(matches!(bad.parse::<VolumeAxis>(), Err(Error::InvalidAxis(_))));
        }
    }

    #[test]
    fn test_index() {
        assert_eq!(VolumeAxis::Z.index(), 0);
        assert_eq!(VolumeAxis::Y.index(), 1);
        assert_eq!(VolumeAxis::X.index(), 2);
        assert_eq!(VolumeAxis::default(), VolumeAxis::Z);
        assert_eq!(VolumeAxis::X.to_string(), "x");
    }
}
