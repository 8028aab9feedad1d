//! Performance grading.
//!
//! Grades an employee on their average approved points per working day.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A letter grade for average daily points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceGrade {
    /// 12 or more points per day.
    #[serde(rename = "A+")]
    APlus,
    /// 10 or more points per day.
    #[serde(rename = "A")]
    A,
    /// 8 or more points per day.
    #[serde(rename = "B+")]
    BPlus,
    /// 7 or more points per day.
    #[serde(rename = "B")]
    B,
    /// 5 or more points per day.
    #[serde(rename = "C")]
    C,
    /// Below 5 points per day.
    #[serde(rename = "D")]
    D,
}

impl PerformanceGrade {
    /// Grades an average of approved points per working day.
    ///
    /// # Examples
    ///
    /// ```
    /// use performance_engine::calculation::PerformanceGrade;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(PerformanceGrade::from_average_points(Decimal::new(9, 0)), PerformanceGrade::BPlus);
    /// assert_eq!(PerformanceGrade::from_average_points(Decimal::ZERO), PerformanceGrade::D);
    /// ```
    pub fn from_average_points(average: Decimal) -> Self {
        if average >= Decimal::new(12, 0) {
            Self::APlus
        } else if average >= Decimal::new(10, 0) {
            Self::A
        } else if average >= Decimal::new(8, 0) {
            Self::BPlus
        } else if average >= Decimal::new(7, 0) {
            Self::B
        } else if average >= Decimal::new(5, 0) {
            Self::C
        } else {
            Self::D
        }
    }

    /// Grades a department's average approved points per record.
    ///
    /// Departments are graded on a gentler scale than individuals and never
    /// fall below `C`.
    ///
    /// ```
    /// use performance_engine::calculation::PerformanceGrade;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(PerformanceGrade::for_department_average(Decimal::new(9, 0)), PerformanceGrade::A);
    /// ```
    pub fn for_department_average(average: Decimal) -> Self {
        if average >= Decimal::new(10, 0) {
            Self::APlus
        } else if average >= Decimal::new(8, 0) {
            Self::A
        } else if average >= Decimal::new(6, 0) {
            Self::BPlus
        } else if average >= Decimal::new(4, 0) {
            Self::B
        } else {
            Self::C
        }
    }

    /// The grade label, e.g. `"A+"`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// A short description of the grade.
    pub fn description(&self) -> &'static str {
        match self {
            Self::APlus => "Exceptional",
            Self::A => "Excellent",
            Self::BPlus => "Very Good",
            Self::B => "Good",
            Self::C => "Satisfactory",
            Self::D => "Needs Improvement",
        }
    }
}

impl std::fmt::Display for PerformanceGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
