//! Dental findings: seven enumerated fields, each with a canned phrase.
//!
//! Form values arrive as free strings. `resolve` maps a string onto a field's
//! key type: exact match on the canonical label or an alias first, then a
//! case- and whitespace-insensitive match. Anything else is `Unrecognized`
//! and contributes no line to the dental text.

use serde::{Deserialize, Serialize};

use super::assemble::normalize_text;

pub const DEFAULT_WRAP: &str = "평소 주기적인 치아관리 (양치) 및 구강 체크를 잘 해주시기 바랍니다.";

/// A closed set of values for one dental field.
pub trait DentalOption: Copy + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    /// Older spellings that still map onto this key.
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }

    fn phrase(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    Known(T),
    Unrecognized,
}

impl<T: DentalOption> Lookup<T> {
    pub fn phrase(self) -> Option<&'static str> {
        match self {
            Lookup::Known(key) => Some(key.phrase()),
            Lookup::Unrecognized => None,
        }
    }
}

fn fold(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn resolve<T: DentalOption>(value: &str) -> Lookup<T> {
    let exact = T::ALL
        .iter()
        .copied()
        .find(|k| k.label() == value || k.aliases().contains(&value));
    if let Some(key) = exact {
        return Lookup::Known(key);
    }

    let wanted = fold(value);
    if wanted.is_empty() {
        return Lookup::Unrecognized;
    }
    T::ALL
        .iter()
        .copied()
        .find(|k| fold(k.label()) == wanted || k.aliases().iter().any(|a| fold(a) == wanted))
        .map_or(Lookup::Unrecognized, Lookup::Known)
}

// ────────────────────────────────────────────────────────────────────────────
// Field key types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OralStatus {
    Good,
    MildInflammation,
    SevereInflammation,
    ExtractionNeeded,
    NotExaminable,
}

impl DentalOption for OralStatus {
    const ALL: &'static [Self] = &[
        Self::Good,
        Self::MildInflammation,
        Self::SevereInflammation,
        Self::ExtractionNeeded,
        Self::NotExaminable,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Good => "양호",
            Self::MildInflammation => "경미한염증",
            Self::SevereInflammation => "심한염증/치료",
            Self::ExtractionNeeded => "발치필요",
            Self::NotExaminable => "신체검사불가",
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Self::Good => "- 전반적으로 구강내 상태 양호합니다.",
            Self::MildInflammation => "- 관리가 필요한 경미한 치과 소견이 있습니다.",
            Self::SevereInflammation => "- 집중관리 및 치료를 요하는 치과 소견이 있습니다.",
            Self::ExtractionNeeded => "- 심한 염증 혹은 발치가 필요한 치아가 있습니다.",
            Self::NotExaminable => "- 아이가 예민하여 면밀한 구강내 상태 관찰이 힘든 상태입니다. 구강내 통증호소, 침흘림 등 특이사항이 있으실 경우에는, 마취 후 육안 및 방사선 촬영 등을 추천드립니다.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GingivitisGrade {
    None,
    Grade1,
    Grade2,
    Grade3,
}

impl DentalOption for GingivitisGrade {
    const ALL: &'static [Self] = &[Self::None, Self::Grade1, Self::Grade2, Self::Grade3];

    fn label(self) -> &'static str {
        grade_label(self as usize)
    }

    fn phrase(self) -> &'static str {
        match self {
            Self::None => "- 정상적인 잇몸상태입니다.",
            Self::Grade1 => "- 경미한 부종 및 색변화, 경계부위의 미약한 치은염(잇몸염증)이 확인됩니다.",
            Self::Grade2 => "- 중등도의 부종 및 잇몸부위 염증이 확인됩니다. 출혈이 있을 수 있습니다.",
            Self::Grade3 => "- 심한 잇몸 부종 및 염증소견이 확인됩니다. 쉽게 출혈이 생길 수 있습니다.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculusGrade {
    None,
    Grade1,
    Grade2,
    Grade3,
}

impl DentalOption for CalculusGrade {
    const ALL: &'static [Self] = &[Self::None, Self::Grade1, Self::Grade2, Self::Grade3];

    fn label(self) -> &'static str {
        grade_label(self as usize)
    }

    fn phrase(self) -> &'static str {
        match self {
            Self::None => "- 치석이 없는 상태입니다.",
            Self::Grade1 => "- 얇은 치석이 치아 표면의 1/3 이내로 확인됩니다.",
            Self::Grade2 => "- 치석이 표면의 1/3~2/3 이내로 쌓인 형태로 확인됩니다.",
            Self::Grade3 => "- 다량의 치석이 표면의 2/3 이상으로 뒤덮힌 형태로 확인됩니다.",
        }
    }
}

fn grade_label(grade: usize) -> &'static str {
    ["None", "Grade 1", "Grade 2", "Grade 3"][grade]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fracture {
    None,
    Suspected,
    Chipped,
    PulpExposed,
}

impl DentalOption for Fracture {
    const ALL: &'static [Self] = &[
        Self::None,
        Self::Suspected,
        Self::Chipped,
        Self::PulpExposed,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::None => "없음",
            Self::Suspected => "의심",
            Self::Chipped => "확인/깨짐",
            Self::PulpExposed => "확인/신경노출",
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Self::None => "- 부러진 치아가 없습니다.",
            Self::Suspected => "- 치아 끝이 약간 깨졌을 수 있으며, 정상일 가능성도 있습니다.",
            Self::Chipped => "- 부러진 치아가 있습니다. 육안상 신경이 지나가지 않는 끝부분(Enamel)의 깨짐으로 보여 치료를 바로 진행해야할 상태는 아닌것으로 생각됩니다. 병변의 변화나 통증이 있는지 모니터링 추천드립니다.",
            Self::PulpExposed => "- 부러진 치아가 있습니다. 육안상 치수(신경)가 노출된 것으로 의심되며, 치과방사선 촬영을 통한 뿌리 상태 체크가 추천됩니다. 결과에 따라 발치가 필요할 수 있습니다. 모니터링을 진행하실 경우에는 병변의 변화나 통증여부의 관찰이 필요합니다.",
        }
    }
}

/// Feline tooth resorption (FORL).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resorption {
    NotSuspected,
    Suspected,
    EndStage,
    Monitoring,
    TreatmentNeeded,
}

impl DentalOption for Resorption {
    const ALL: &'static [Self] = &[
        Self::NotSuspected,
        Self::Suspected,
        Self::EndStage,
        Self::Monitoring,
        Self::TreatmentNeeded,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::NotSuspected => "의심 없음",
            Self::Suspected => "의심",
            Self::EndStage => "확인/완전흡수",
            Self::Monitoring => "확인/모니터링",
            Self::TreatmentNeeded => "확인/치료 필요",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::TreatmentNeeded => &["확인/치료"],
            _ => &[],
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Self::NotSuspected => "- 고양이 치아흡수성 병변(FORL)이 의심되는 치아는 없습니다.",
            Self::Suspected => "- 고양이 치아흡수성 병변(FORL)이 의심되는 치아가 있습니다.",
            Self::EndStage => "- 고양이 치아흡수성 병변(FORL)이 의심되는 치아가 있으나, end stage로서 흡수가 거의 끝난 상태로 생각됩니다. 치아방사선 촬영을 통해 정확한 진행 정도 및 다른 치아의 추가적인 이환여부를 확인할 수 있습니다. 일반적으로 통증을 유발할 수 있습니다. 증상이 있고 뿌리가 남아있을 경우, 혹은 다른 치아도 의심되는 경우 추가 검사 및 발치에 대하여 상담해보시는 것을 추천드립니다.",
            Self::Monitoring => "- 고양이 치아흡수성 병변(FORL)이 의심되는 치아가 있습니다. 치아방사선 촬영을 통해 정확한 진행 정도 및 다른 치아의 추가적인 이환여부를 확인할 수 있습니다. 일반적으로 통증을 유발할 수 있습니다. 증상이 있거나 추가 검사 및 발치에 대하여 상담해보시는 것을 추천드립니다.",
            Self::TreatmentNeeded => "- 고양이 치아흡수성 병변(FORL)이 확인됩니다. 치아방사선 촬영을 통해 정확한 진행 정도 및 다른 치아의 추가적인 이환여부를 확인할 수 있습니다. 현재 통증 및 염증을 유발할 수 있는 것으로 보여, 추가 검사 및 발치에 대하여 상담해보시는 것을 추천드립니다.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingTeeth {
    None,
    Suspected,
    Confirmed,
}

impl DentalOption for MissingTeeth {
    const ALL: &'static [Self] = &[Self::None, Self::Suspected, Self::Confirmed];

    fn label(self) -> &'static str {
        match self {
            Self::None => "없음",
            Self::Suspected => "의심",
            Self::Confirmed => "확인",
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Self::None => "- 빠지거나 발치한 치아가 없습니다.",
            Self::Suspected => "- 빠지거나 발치한 치아가 있을 수 있으나, 정확한 평가가 필요합니다.",
            Self::Confirmed => "- 빠지거나 발치한 치아가 있습니다.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaling {
    NotRecommended,
    MildlyRecommended,
    StronglyRecommended,
    CompletedToday,
}

impl DentalOption for Scaling {
    const ALL: &'static [Self] = &[
        Self::NotRecommended,
        Self::MildlyRecommended,
        Self::StronglyRecommended,
        Self::CompletedToday,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::NotRecommended => "권장되지 않음",
            Self::MildlyRecommended => "경미한 권장",
            Self::StronglyRecommended => "강력한 권장",
            Self::CompletedToday => "금일진행완료",
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Self::NotRecommended => "- 현재는 스케일링은 필요없습니다.",
            Self::MildlyRecommended => "- 스케일링이 시급한 정도는 아니나 진행해주시면 좋은 상태입니다.",
            Self::StronglyRecommended => "- 스케일링이 추천됩니다.",
            Self::CompletedToday => "- 금일 스케일링으로 구강내 치석을 모두 제거한 상태입니다.",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Form state and rendering
// ────────────────────────────────────────────────────────────────────────────

/// Raw dental form values, one string per dropdown plus two free-text fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DentalFindings {
    pub status: String,
    pub gingivitis: String,
    pub calculus: String,
    pub fracture: String,
    /// Tooth resorption lesion.
    #[serde(alias = "tr")]
    pub resorption: String,
    pub missing: String,
    pub scaling: String,
    /// Closing remark, pre-filled and editable.
    pub wrap: String,
    /// Extra comment appended last.
    pub note: String,
}

impl Default for DentalFindings {
    fn default() -> Self {
        Self {
            status: OralStatus::Good.label().to_string(),
            gingivitis: "none".to_string(),
            calculus: "none".to_string(),
            fracture: Fracture::None.label().to_string(),
            resorption: Resorption::NotSuspected.label().to_string(),
            missing: MissingTeeth::None.label().to_string(),
            scaling: Scaling::NotRecommended.label().to_string(),
            wrap: DEFAULT_WRAP.to_string(),
            note: String::new(),
        }
    }
}

/// Dropdown labels per field, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct DentalOptions {
    pub status: Vec<&'static str>,
    pub gingivitis: Vec<&'static str>,
    pub calculus: Vec<&'static str>,
    pub fracture: Vec<&'static str>,
    pub resorption: Vec<&'static str>,
    pub missing: Vec<&'static str>,
    pub scaling: Vec<&'static str>,
}

fn labels<T: DentalOption>() -> Vec<&'static str> {
    T::ALL.iter().map(|k| k.label()).collect()
}

pub fn dental_options() -> DentalOptions {
    DentalOptions {
        status: labels::<OralStatus>(),
        gingivitis: labels::<GingivitisGrade>(),
        calculus: labels::<CalculusGrade>(),
        fracture: labels::<Fracture>(),
        resorption: labels::<Resorption>(),
        missing: labels::<MissingTeeth>(),
        scaling: labels::<Scaling>(),
    }
}

pub fn dental_text(d: &DentalFindings) -> String {
    let phrases = [
        resolve::<OralStatus>(&d.status).phrase(),
        resolve::<GingivitisGrade>(&d.gingivitis).phrase(),
        resolve::<CalculusGrade>(&d.calculus).phrase(),
        resolve::<Fracture>(&d.fracture).phrase(),
        resolve::<Resorption>(&d.resorption).phrase(),
        resolve::<MissingTeeth>(&d.missing).phrase(),
        resolve::<Scaling>(&d.scaling).phrase(),
    ];

    let mut lines: Vec<String> = phrases.into_iter().flatten().map(str::to_string).collect();

    let wrap = d.wrap.trim();
    if !wrap.is_empty() {
        lines.push(wrap.to_string());
    }
    let note = d.note.trim();
    if !note.is_empty() {
        lines.push(format!("- 추가 코멘트: {note}"));
    }

    normalize_text(&lines.join("\n"))
}
