//! Keyword to summarization purpose mapping.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

/// Built-in rules, matched in this order.
const DEFAULT_RULES: &[(&str, &str)] = &[
    ("코인", "가상자산 뉴스 요약"),
    ("비트코인", "가상자산 뉴스 요약"),
    ("가상화폐", "가상자산 뉴스 요약"),
    ("이더리움", "가상자산 뉴스 요약"),
    ("취업", "취업 시장 동향 요약"),
    ("취준", "취업 준비 트렌드 요약"),
    ("스펙", "청년 구직 전략 정보 요약"),
    ("공채", "대기업 채용 동향 요약"),
    ("채용", "채용 뉴스 요약"),
    ("NCS", "공기업 준비 뉴스 요약"),
    ("주식", "주식시장 뉴스 요약"),
    ("ETF", "금융상품 동향 요약"),
    ("미국 증시", "해외 증시 동향 요약"),
    ("테슬라", "해외 기업 뉴스 요약"),
    ("애플", "글로벌 IT 기업 뉴스 요약"),
    ("부동산", "부동산 시장 동향 요약"),
    ("월세", "주거비용/부동산 트렌드 요약"),
    ("아파트", "주택 시장 뉴스 요약"),
    ("다이어트", "헬스/운동 트렌드 요약"),
    ("헬스", "헬스케어 트렌드 요약"),
    ("운동", "MZ 라이프스타일 뉴스 요약"),
    ("메타버스", "신기술 트렌드 요약"),
    ("일론 머스크", "글로벌 기업가 뉴스 요약"),
    ("챗GPT", "AI 기술 트렌드 요약"),
    ("AI", "인공지능 뉴스 요약"),
];

const FALLBACK_SUFFIX: &str = "관련 뉴스 요약";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurposeRule {
    pub trigger: String,
    pub purpose: String,
}

impl PurposeRule {
    pub fn new(trigger: impl Into<String>, purpose: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            purpose: purpose.into(),
        }
    }
}

/// Ordered rule table. The first rule whose trigger occurs in the keyword wins.
#[derive(Debug, Clone)]
pub struct PurposeResolver {
    rules: Vec<PurposeRule>,
}

impl Default for PurposeResolver {
    fn default() -> Self {
        Self::new(
            DEFAULT_RULES
                .iter()
                .map(|(trigger, purpose)| PurposeRule::new(*trigger, *purpose))
                .collect(),
        )
    }
}

impl PurposeResolver {
    pub fn new(rules: Vec<PurposeRule>) -> Self {
        Self { rules }
    }

    /// Loads a JSON array of `{"trigger", "purpose"}` objects, keeping file order.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let rules: Vec<PurposeRule> = serde_json::from_str(&raw)?;
        if let Some(rule) = rules.iter().find(|r| r.trigger.is_empty()) {
            return Err(Error::External(anyhow::anyhow!(
                "rule for purpose '{}' has an empty trigger",
                rule.purpose
            )));
        }
        tracing::info!(count = rules.len(), path = %path.as_ref().display(), "Loaded purpose rules");
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[PurposeRule] {
        &self.rules
    }

    pub fn resolve(&self, keyword: &str) -> String {
        self.rules
            .iter()
            .find(|rule| keyword.contains(rule.trigger.as_str()))
            .map(|rule| rule.purpose.clone())
            .unwrap_or_else(|| fallback_purpose(keyword))
    }
}

pub fn fallback_purpose(keyword: &str) -> String {
    format!("{} {}", keyword, FALLBACK_SUFFIX)
}
