//! Prompt templates for business tone conversion

use std::fmt;
use tracing::warn;

/// Role of the assistant, shared by every persona
pub const BASE_INSTRUCTION: &str = "당신은 한국 비즈니스 커뮤니케이션 전문가입니다. 사용자의 핵심 내용을 바탕으로 상황과 대상에 맞는 가장 적절한 '단 하나'의 비즈니스 메시지를 한국어로 작성하세요.";

/// Output discipline: Korean only, exactly one message, no commentary
pub const OUTPUT_INSTRUCTION: &str = "반드시 한국어로만 응답하세요. 영어 서술, 'Here is...', 'Or...' 등 모든 불필요한 서술과 선택지를 배제하고, 오직 변환된 단 하나의 한국어 메시지만 출력하세요.";

const UPWARD_TONE: &str = "대상은 '직장 상사'입니다. 보고의 명확성, 격식, 신뢰성을 중시하며, 결론부터 제시하는 두괄식 하십시오체를 사용하세요.";
const LATERAL_TONE: &str = "대상은 '타팀 동료'입니다. 협업의 원활함과 요청의 명확성을 중시하며, 친절하고 상호 존중하는 해요체를 사용하세요.";
const EXTERNAL_TONE: &str = "대상은 '외부 고객'입니다. 서비스의 신뢰도와 친절함을 중시하며, 극존칭 하십시오체를 사용하세요.";

/// Addressee of the converted message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Persona {
    /// Superior at work
    Upward,
    /// Peer on another team
    #[default]
    Lateral,
    /// External customer
    External,
}

impl Persona {
    pub const ALL: [Persona; 3] = [Persona::Upward, Persona::Lateral, Persona::External];

    /// Resolve a persona identifier.
    ///
    /// Unknown identifiers fall back to `Lateral` instead of being rejected.
    pub fn from_id(id: &str) -> Self {
        Self::parse(id).unwrap_or_else(|| {
            warn!("Unknown persona '{}', falling back to {}", id, Self::default());
            Self::default()
        })
    }

    /// Strict lookup, `None` for unknown identifiers
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "upward" => Some(Self::Upward),
            "lateral" => Some(Self::Lateral),
            "external" => Some(Self::External),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Upward => "upward",
            Self::Lateral => "lateral",
            Self::External => "external",
        }
    }

    /// Audience-specific tone directive
    pub fn tone_directive(&self) -> &'static str {
        match self {
            Self::Upward => UPWARD_TONE,
            Self::Lateral => LATERAL_TONE,
            Self::External => EXTERNAL_TONE,
        }
    }

    /// Full system prompt: base + tone + output discipline
    pub fn system_prompt(&self) -> String {
        format!(
            "{} {} {}",
            BASE_INSTRUCTION,
            self.tone_directive(),
            OUTPUT_INSTRUCTION
        )
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// User turn wrapping the raw input
pub fn user_message(keywords: &str) -> String {
    format!(
        "다음 내용을 비즈니스 말투로 변환해줘 (한국어로 한 가지만 출력):\n\n{}",
        keywords
    )
}
