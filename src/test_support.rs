//! Shared fixtures for unit tests.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::RotaConfig;
use crate::models::{
    AdjustmentRule, Availability, Baseline, BoundaryField, Group, Person, Role, SegmentDefinition,
    SegmentName, TimeOff, WeeklyAvailability,
};

pub fn make_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

pub fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
        .unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn segment(name: SegmentName, start: NaiveTime, end: NaiveTime, order: u32) -> SegmentDefinition {
    SegmentDefinition {
        name,
        start,
        end,
        order,
        half: None,
    }
}

/// Same catalog as `config/default/segments.yaml`.
pub fn standard_segments() -> Vec<SegmentDefinition> {
    vec![
        segment(SegmentName::Early, time(6, 20), time(7, 20), 0),
        segment(SegmentName::Am, time(8, 0), time(12, 0), 1),
        segment(SegmentName::Lunch, time(11, 0), time(13, 0), 2),
        segment(SegmentName::Pm, time(13, 0), time(17, 0), 3),
    ]
}

pub fn rule(
    id: u32,
    condition: SegmentName,
    target: SegmentName,
    field: BoundaryField,
    baseline: Baseline,
    offset_minutes: i64,
) -> AdjustmentRule {
    AdjustmentRule {
        id,
        condition_segment: condition,
        condition_role_id: None,
        target_segment: target,
        target_field: field,
        baseline,
        offset_minutes,
    }
}

/// Same rules as `config/default/rules.yaml`.
pub fn standard_rules() -> Vec<AdjustmentRule> {
    vec![
        rule(
            10,
            SegmentName::Lunch,
            SegmentName::Am,
            BoundaryField::End,
            Baseline::ConditionStart,
            0,
        ),
        rule(
            20,
            SegmentName::Lunch,
            SegmentName::Pm,
            BoundaryField::Start,
            Baseline::ConditionEnd,
            60,
        ),
        rule(
            30,
            SegmentName::Early,
            SegmentName::Pm,
            BoundaryField::End,
            Baseline::TargetEnd,
            -60,
        ),
    ]
}

pub fn group(id: &str, name: &str) -> Group {
    Group {
        id: id.to_string(),
        name: name.to_string(),
        theme_color: String::new(),
    }
}

pub fn role(id: &str, group_id: &str, segments: &[SegmentName]) -> Role {
    Role {
        id: id.to_string(),
        code: id.trim_start_matches("role_").to_uppercase(),
        name: id.to_string(),
        group_id: group_id.to_string(),
        applicable_segments: segments.iter().cloned().collect(),
    }
}

/// Same organization as `config/default/organization.yaml`.
pub fn standard_config() -> RotaConfig {
    let half_days = [SegmentName::Am, SegmentName::Lunch, SegmentName::Pm];
    RotaConfig::new(
        standard_segments(),
        standard_rules(),
        vec![
            group("grp_front", "Front Office"),
            group("grp_facilities", "Facilities"),
        ],
        vec![
            role("role_front", "grp_front", &half_days),
            role("role_phones", "grp_front", &half_days),
            role("role_opening", "grp_facilities", &[SegmentName::Early]),
            role(
                "role_mail",
                "grp_facilities",
                &[SegmentName::Am, SegmentName::Pm],
            ),
        ],
    )
    .unwrap()
}

pub fn person(id: &str, name: &str) -> Person {
    Person {
        id: id.to_string(),
        name: name.to_string(),
        work_email: format!("{}@example.org", id),
        active: true,
        weekly_availability: WeeklyAvailability::uniform(Availability::Both),
    }
}

pub fn time_off(person_id: &str, start: NaiveDateTime, end: NaiveDateTime) -> TimeOff {
    TimeOff {
        person_id: person_id.to_string(),
        start,
        end,
        reason: "Appointment".to_string(),
    }
}
