use crate::models::{Locale, MissTendency};

/// Message id for a scoring factor, carrying the detail shown to the user
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReasonKind {
    SwingSpeedMatch { speed_mph: u16 },
    SwingSpeedNear { speed_mph: u16 },
    SwingSpeedMismatch { speed_mph: u16 },
    HandicapMatch { handicap: u16 },
    Forgiveness { level: u8 },
    Control { level: u8 },
    MissTendencyFix(MissTendency),
    WithinBudget { price: u64 },
    NearBudget { price: u64 },
    OverBudget { price: u64 },
}

impl ReasonKind {
    pub fn render(&self, locale: Locale) -> String {
        match locale {
            Locale::Ko => self.render_ko(),
            Locale::En => self.render_en(),
        }
    }

    fn render_ko(&self) -> String {
        match *self {
            ReasonKind::SwingSpeedMatch { speed_mph } => {
                format!("적합한 스윙 스피드 ({}mph)", speed_mph)
            }
            ReasonKind::SwingSpeedNear { speed_mph } => {
                format!("스윙 스피드({}mph)와 근접한 추천 범위", speed_mph)
            }
            ReasonKind::SwingSpeedMismatch { speed_mph } => {
                format!("스윙 스피드({}mph)가 추천 범위를 벗어남", speed_mph)
            }
            ReasonKind::HandicapMatch { handicap } => {
                format!("핸디캡 {}에 맞는 추천 모델", handicap)
            }
            ReasonKind::Forgiveness { level } => {
                format!("높은 관용성(레벨 {})으로 미스샷 부담 완화", level)
            }
            ReasonKind::Control { level } => format!("정교한 컨트롤 성능(레벨 {})", level),
            ReasonKind::MissTendencyFix(tendency) => match tendency {
                MissTendency::Slice => "슬라이스 교정에 도움".to_string(),
                MissTendency::Hook => "훅 교정에 도움".to_string(),
                MissTendency::Thin => "토핑 미스 완화".to_string(),
                MissTendency::Fat => "뒤땅 미스 완화".to_string(),
            },
            ReasonKind::WithinBudget { price } => {
                format!("예산 내 가격 ({}원)", format_price(price))
            }
            ReasonKind::NearBudget { price } => {
                format!("예산에 근접한 가격 ({}원)", format_price(price))
            }
            ReasonKind::OverBudget { price } => format!("예산 초과 ({}원)", format_price(price)),
        }
    }

    fn render_en(&self) -> String {
        match *self {
            ReasonKind::SwingSpeedMatch { speed_mph } => {
                format!("Matches your swing speed ({} mph)", speed_mph)
            }
            ReasonKind::SwingSpeedNear { speed_mph } => {
                format!("Close to your swing speed ({} mph)", speed_mph)
            }
            ReasonKind::SwingSpeedMismatch { speed_mph } => {
                format!("Outside the range for your swing speed ({} mph)", speed_mph)
            }
            ReasonKind::HandicapMatch { handicap } => {
                format!("Suited to a {} handicap", handicap)
            }
            ReasonKind::Forgiveness { level } => {
                format!("High forgiveness (level {}) softens mishits", level)
            }
            ReasonKind::Control { level } => format!("Precise control (level {})", level),
            ReasonKind::MissTendencyFix(tendency) => match tendency {
                MissTendency::Slice => "Helps correct a slice".to_string(),
                MissTendency::Hook => "Helps correct a hook".to_string(),
                MissTendency::Thin => "Reduces thin shots".to_string(),
                MissTendency::Fat => "Reduces fat shots".to_string(),
            },
            ReasonKind::WithinBudget { price } => {
                format!("Within your budget ({} KRW)", format_price(price))
            }
            ReasonKind::NearBudget { price } => {
                format!("Just above your budget ({} KRW)", format_price(price))
            }
            ReasonKind::OverBudget { price } => {
                format!("Over your budget ({} KRW)", format_price(price))
            }
        }
    }
}

/// Group thousands with commas: 499000 -> "499,000"
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0), "0");
        assert_eq!(format_price(999), "999");
        assert_eq!(format_price(1000), "1,000");
        assert_eq!(format_price(499000), "499,000");
        assert_eq!(format_price(12345678), "12,345,678");
    }

    #[test]
    fn test_render_locales() {
        let kind = ReasonKind::SwingSpeedMatch { speed_mph: 92 };
        assert_eq!(kind.render(Locale::Ko), "적합한 스윙 스피드 (92mph)");
        assert_eq!(kind.render(Locale::En), "Matches your swing speed (92 mph)");
    }

    #[test]
    fn test_miss_tendency_messages() {
        let slice = ReasonKind::MissTendencyFix(MissTendency::Slice);
        assert!(slice.render(Locale::Ko).contains("슬라이스"));
        assert!(slice.render(Locale::En).contains("slice"));
    }
}
