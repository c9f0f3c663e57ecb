//! Prompt templates. Summaries are requested in Korean.

/// Per-article prompt: a 3-4 line summary of `article` written toward `purpose`.
pub fn article_prompt(purpose: &str, article: &str) -> String {
    format!(
        "\n너는 한국어 뉴스 기사를 요약하는 AI야.\n\
         아래 기사 내용을 사용자가 원하는 목적에 맞춰 3~4줄로 요약해줘.\n\
         \n\
         요약 목적: {purpose}\n\
         \n\
         뉴스 기사 원문:\n\
         {article}\n"
    )
}

/// Aggregate prompt: a 3-5 line trend summary over the joined article summaries.
pub fn trend_prompt(purpose: &str, summaries: &str) -> String {
    format!(
        "\n다음은 최근 뉴스 기사들의 요약입니다.\n\
         요약들을 바탕으로 '{purpose}'에 대한 최신 트렌드와 공통 내용을 정리해서 사용자 입장에서 보기 쉽게,\n\
         3~5줄 분량으로 종합 요약을 해줘.\n\
         \n\
         기사 요약 모음:\n\
         {summaries}\n"
    )
}
