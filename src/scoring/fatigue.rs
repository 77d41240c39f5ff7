use crate::error::Result;
use crate::scoring::{Answer, yes_no};
use crate::state::store::DataStore;
use serde::Serialize;
use std::fmt;

pub const MEDICATION_FIELD: &str = "medication";
pub const STRESS_FIELD: &str = "stress";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepLast24h {
    LessThan5,
    FiveToSix,
    SevenPlus,
}

impl Answer for SleepLast24h {
    const FIELD: &'static str = "sleep_24h";

    fn all() -> &'static [Self] {
        &[Self::LessThan5, Self::FiveToSix, Self::SevenPlus]
    }

    fn label(self) -> &'static str {
        match self {
            Self::LessThan5 => "Less than 5",
            Self::FiveToSix => "5-6",
            Self::SevenPlus => "7+",
        }
    }
}

impl SleepLast24h {
    fn points(self) -> u32 {
        match self {
            Self::LessThan5 => 2,
            Self::FiveToSix => 1,
            Self::SevenPlus => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepLast48h {
    LessThan12,
    TwelveToThirteen,
    FourteenPlus,
}

impl Answer for SleepLast48h {
    const FIELD: &'static str = "sleep_48h";

    fn all() -> &'static [Self] {
        &[Self::LessThan12, Self::TwelveToThirteen, Self::FourteenPlus]
    }

    fn label(self) -> &'static str {
        match self {
            Self::LessThan12 => "Less than 12",
            Self::TwelveToThirteen => "12-13",
            Self::FourteenPlus => "14+",
        }
    }
}

impl SleepLast48h {
    fn points(self) -> u32 {
        match self {
            Self::LessThan12 => 2,
            Self::TwelveToThirteen => 1,
            Self::FourteenPlus => 0,
        }
    }
}

/// Self-rated alertness, worded after the Stanford sleepiness scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alertness {
    WideAwake,
    FunctioningWell,
    Relaxed,
    Foggy,
    Sleepy,
}

impl Answer for Alertness {
    const FIELD: &'static str = "alertness";

    fn all() -> &'static [Self] {
        &[
            Self::WideAwake,
            Self::FunctioningWell,
            Self::Relaxed,
            Self::Foggy,
            Self::Sleepy,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Self::WideAwake => "Feeling active, vital, alert, or wide awake.",
            Self::FunctioningWell => "Functioning at high levels, but not at peak.",
            Self::Relaxed => "Awake, but relaxed; responsive but not fully alert.",
            Self::Foggy => "Somewhat foggy, let down.",
            Self::Sleepy => "Sleepy, groggy, hard to concentrate.",
        }
    }
}

impl Alertness {
    fn points(self) -> u32 {
        match self {
            Self::WideAwake | Self::FunctioningWell => 0,
            Self::Relaxed | Self::Foggy => 1,
            Self::Sleepy => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Answer for Gender {
    const FIELD: &'static str = "gender";

    fn all() -> &'static [Self] {
        &[Self::Male, Self::Female, Self::Other]
    }

    fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// Standard drinks in the last 24 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlcoholIntake {
    None,
    OneToTwo,
    ThreeToFour,
    FiveToSix,
    MoreThanSix,
}

impl Answer for AlcoholIntake {
    const FIELD: &'static str = "alcohol_intake";

    fn all() -> &'static [Self] {
        &[
            Self::None,
            Self::OneToTwo,
            Self::ThreeToFour,
            Self::FiveToSix,
            Self::MoreThanSix,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::OneToTwo => "1-2",
            Self::ThreeToFour => "3-4",
            Self::FiveToSix => "5-6",
            Self::MoreThanSix => "More than 6",
        }
    }
}

impl AlcoholIntake {
    /// Thresholds sit one bracket lower for anyone not answering "Male".
    fn points(self, gender: Gender) -> u32 {
        match (gender, self) {
            (_, Self::None | Self::OneToTwo) => 0,
            (Gender::Male, Self::ThreeToFour) => 0,
            (Gender::Male, Self::FiveToSix) => 1,
            (Gender::Male, Self::MoreThanSix) => 2,
            (_, Self::ThreeToFour) => 1,
            (_, Self::FiveToSix | Self::MoreThanSix) => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wellbeing {
    ZeroToTwo,
    ThreeToFive,
    SixToSeven,
    EightToTen,
}

impl Answer for Wellbeing {
    const FIELD: &'static str = "wellbeing";

    fn all() -> &'static [Self] {
        &[
            Self::ZeroToTwo,
            Self::ThreeToFive,
            Self::SixToSeven,
            Self::EightToTen,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Self::ZeroToTwo => "0-2",
            Self::ThreeToFive => "3-5",
            Self::SixToSeven => "6-7",
            Self::EightToTen => "8-10",
        }
    }
}

impl Wellbeing {
    fn points(self) -> u32 {
        match self {
            Self::ZeroToTwo => 2,
            Self::ThreeToFive => 1,
            Self::SixToSeven | Self::EightToTen => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=2 => Self::Low,
            3..=4 => Self::Moderate,
            _ => Self::High,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Moderate => "MODERATE",
            Self::High => "HIGH",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            Self::Low => "Fit for work. Continue to monitor for signs of fatigue.",
            Self::Moderate => {
                "Notify your supervisor and agree on controls such as extra breaks or task rotation."
            }
            Self::High => {
                "Do not commence safety-critical work. Speak to your supervisor before starting the shift."
            }
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FatigueAnswers {
    pub sleep_24h: SleepLast24h,
    pub sleep_48h: SleepLast48h,
    pub alertness: Alertness,
    pub gender: Gender,
    pub alcohol: AlcoholIntake,
    pub medication: bool,
    pub stress: bool,
    pub wellbeing: Wellbeing,
}

impl FatigueAnswers {
    pub fn from_data(data: &DataStore) -> Result<Self> {
        Ok(Self {
            sleep_24h: SleepLast24h::from_data(data)?,
            sleep_48h: SleepLast48h::from_data(data)?,
            alertness: Alertness::from_data(data)?,
            gender: Gender::from_data(data)?,
            alcohol: AlcoholIntake::from_data(data)?,
            medication: yes_no(data, MEDICATION_FIELD)?,
            stress: yes_no(data, STRESS_FIELD)?,
            wellbeing: Wellbeing::from_data(data)?,
        })
    }

    pub fn assess(&self) -> FatigueAssessment {
        let flag = |set: bool| -> u32 { if set { 2 } else { 0 } };
        let breakdown = vec![
            (SleepLast24h::FIELD, self.sleep_24h.points()),
            (SleepLast48h::FIELD, self.sleep_48h.points()),
            (Alertness::FIELD, self.alertness.points()),
            (AlcoholIntake::FIELD, self.alcohol.points(self.gender)),
            (MEDICATION_FIELD, flag(self.medication)),
            (STRESS_FIELD, flag(self.stress)),
            (Wellbeing::FIELD, self.wellbeing.points()),
        ];
        let score = breakdown.iter().map(|(_, points)| points).sum();
        FatigueAssessment {
            score,
            level: RiskLevel::from_score(score),
            breakdown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FatigueAssessment {
    pub score: u32,
    pub level: RiskLevel,
    pub breakdown: Vec<(&'static str, u32)>,
}

pub fn assess(data: &DataStore) -> Result<FatigueAssessment> {
    let assessment = FatigueAnswers::from_data(data)?.assess();
    tracing::debug!(score = assessment.score, level = %assessment.level, "fatigue assessed");
    Ok(assessment)
}
