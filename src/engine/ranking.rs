// ==========================================
// 零售商品铺货分配引擎 - 优先级排序引擎
// ==========================================
// 职责: 为全部 门店×款式 生成唯一的全局优先级
// 输入: 分层结果 + 快照索引 (销售历史、陈列达成率、库存)
// 输出: 按优先级排好序的 门店×款式 列表 (rank 从 1 开始)
// ==========================================
// 红线: 排序键为单一复合比较器,末位键为 (款式, 门店) 字典序,
//       任意两条记录都可区分,结果与输入顺序无关
// ==========================================

mod blend;
mod core;

#[cfg(test)]
mod tests;

pub use blend::{blend_from_config, LocalOnlyBlend, RevenueBlend, SparseHistoryBlend};
pub use core::{compare_priority, RankedStoreStyle, RankingEngine, RankingKey};
