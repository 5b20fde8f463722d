// ==========================================
// 零售商品铺货分配引擎 - 领域类型定义
// ==========================================
// 职责: 表现分层、尺码标签、节点类型、迭代用途等枚举
// 序列化格式: SCREAMING_SNAKE_CASE (与上游数据一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 表现分层 (Segment)
// ==========================================
// 红线: 每次运行只写入一次,后续阶段不得覆写
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Segment {
    TopSeller,    // 畅销
    NormalSeller, // 正常
    BottomSeller, // 滞销
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::TopSeller, Segment::NormalSeller, Segment::BottomSeller];
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::TopSeller => write!(f, "TOP_SELLER"),
            Segment::NormalSeller => write!(f, "NORMAL_SELLER"),
            Segment::BottomSeller => write!(f, "BOTTOM_SELLER"),
        }
    }
}

impl FromStr for Segment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "TOP_SELLER" => Ok(Segment::TopSeller),
            "NORMAL_SELLER" => Ok(Segment::NormalSeller),
            "BOTTOM_SELLER" => Ok(Segment::BottomSeller),
            other => Err(format!("未知表现分层: {}", other)),
        }
    }
}

// ==========================================
// 尺码标签 (Size Tag)
// ==========================================
// 未打标尺码不参与任何分配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizeTag {
    Pivotal,    // 核心尺码
    NonPivotal, // 非核心尺码
    Untagged,   // 未打标
}

impl fmt::Display for SizeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeTag::Pivotal => write!(f, "PIVOTAL"),
            SizeTag::NonPivotal => write!(f, "NON_PIVOTAL"),
            SizeTag::Untagged => write!(f, "UNTAGGED"),
        }
    }
}

// ==========================================
// 节点类型 (Node Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Warehouse,
    Store,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Warehouse => write!(f, "WAREHOUSE"),
            NodeKind::Store => write!(f, "STORE"),
        }
    }
}

// ==========================================
// 迭代用途 (Iteration Purpose)
// ==========================================
// 仅用于展示与汇总; 规则参数由 IterationKind 携带
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IterationPurpose {
    TopSeller,
    Replenishment,
    PlanogramFill,
    NonPivotalSize,
    MinAge,
    Inclusion,
}

impl fmt::Display for IterationPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IterationPurpose::TopSeller => "TOP_SELLER",
            IterationPurpose::Replenishment => "REPLENISHMENT",
            IterationPurpose::PlanogramFill => "PLANOGRAM_FILL",
            IterationPurpose::NonPivotalSize => "NON_PIVOTAL_SIZE",
            IterationPurpose::MinAge => "MIN_AGE",
            IterationPurpose::Inclusion => "INCLUSION",
        };
        write!(f, "{}", s)
    }
}
