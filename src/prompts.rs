//! Embedded prompts and reply templates
//!
//! These are compiled into the binary. The offline templates are the exact
//! text shown to users in demo mode, so they must stay byte-stable: tests
//! compare replies against them verbatim.

/// Behavioral instructions seeded as the first conversation entry
pub const SYSTEM_PROMPT: &str = r#"你是一個學習輔導 Agent（Learning Advisor Agent），專長是協助大學生釐清學習困難、
規劃學習策略並提供可執行的建議。

規則：
1) 先詢問背景（課程、程度、困難、可用時間）
2) 資訊不足先追問
3) 資訊足夠後輸出：問題診斷、學習策略、行動清單、推薦資源
"#;

/// Fixed assistant greeting seeded right after the system prompt
pub const GREETING: &str = "你好！請先告訴我你目前在學什麼，以及最大的學習困難是什麼？";

/// Offline reply when the user's message does not carry enough context yet
pub const CLARIFY_TEMPLATE: &str = "（離線 Demo 模式）我先了解一下你的狀況，幫你做出可執行計畫：\n\
1) 你是什麼科目/課程？（例：ML、OS、線代）\n\
2) 你目前程度到哪？（看過哪些章節/作業做得出來嗎）\n\
3) 最卡的是哪一塊？（觀念/推導/寫程式/題目）\n\
4) 一週可投入幾小時？最近有沒有 deadline？";

/// Offline reply once enough context is available: a structured study plan
/// with four sections in fixed order
pub const PLAN_TEMPLATE: &str = "（離線 Demo 模式）\n\n\
## 問題診斷\n\
- 你目前描述的卡點偏向：概念理解 + 練習量不足（若不準你再修正）\n\n\
## 學習策略\n\
**短期（3天）**\n\
- 每天 45–60 分鐘：看 1 個核心概念 + 做 3 題對應練習\n\
- 錯題要寫『錯因』：看不懂題意 / 不會套公式 / 推導卡住 / 程式實作卡住\n\n\
**中期（2週）**\n\
- 每週做一次小測：10 題，限時，檢查弱點\n\
- 以『題型』整理筆記，而不是只抄章節\n\n\
## 每日/每週行動清單\n\
- Day1：列出必會清單（5–10項）\n\
- Day2：針對最弱 2 項各做 5 題\n\
- Day3：做一回合小測 + 回補錯題\n\
- Weekly：固定 2 次 90 分鐘深度練習（關掉手機）\n\n\
## 推薦資源\n\
- 關鍵字：\"practice problems\" + 你的課名\n\
- 練習方式：先看例題→遮答案自己做→對答案→寫下錯因\n";

/// Prefix prepended to the offline reply when the remote service fails on
/// quota or rate limit
pub const QUOTA_NOTICE: &str = "（目前 API 額度不足，已自動切換離線 Demo 模式）";
