// Prompts for the report polisher. Output is expected in Korean, facts and
// hedging preserved, structure kept.

use super::options::PolishOptions;

const ROLE: &str =
    "너는 수의학 건강검진 결과를 환자 보호자에게 전달하기 좋게 문장을 다듬는 보조가이드다.";

const FIDELITY: &str = "사실 왜곡 금지, 의학적 단정 금지(추정/가능성 표현 유지).";

const STRUCTURE: &str = "줄바꿈과 글머리표는 원문 구조를 최대한 보존하되 문장만 매끄럽게.";

const UNITS: &str = "숫자/단위/기호는 그대로 유지(필요 시 한국어 단위 병기).";

pub fn system_prompt(options: &PolishOptions) -> String {
    let settings = format!("{options}.");
    [ROLE, FIDELITY, settings.as_str(), STRUCTURE, UNITS].join("\n")
}

pub fn user_prompt(text: &str) -> String {
    format!("다듬을 원문:\n```\n{text}\n```\n\n출력은 한국어만. 앞뒤 공백 제거.")
}
