//! Demonstration bookings the application starts with

use crate::core::record::{Record, status};
use chrono::{DateTime, TimeZone, Utc};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

/// Ten sample bookings spread over event types, statuses and halls
pub fn demo_records() -> Vec<Record> {
    vec![
        Record::with_id("1", "Maria Ivanova", "Ceremony and banquet", at(2024, 11, 15, 10, 0))
            .title("Wedding of Maria and Alexey")
            .photo_link("/images/avatar1.png")
            .date(at(2024, 12, 15, 18, 0))
            .guests(120)
            .event_type("wedding")
            .status(status::CONFIRMED)
            .hall("Grand Hall"),
        Record::with_id(
            "2",
            "Petr Sidorov",
            "New Year party for the staff",
            at(2024, 11, 10, 14, 30),
        )
        .title("Technologies Ltd. corporate party")
        .photo_link("/images/avatar2.png")
        .date(at(2024, 12, 20, 19, 0))
        .guests(80)
        .event_type("corporate")
        .status(status::PROCESSING)
        .hall("Business Center"),
        Record::with_id("3", "Sergey Kovalev", "50th birthday celebration", at(2024, 11, 12, 9, 15))
            .title("Anna Petrovna's anniversary")
            .photo_link("/images/avatar1.png")
            .date(at(2024, 12, 10, 17, 0))
            .guests(60)
            .event_type("birthday")
            .status(status::CONFIRMED)
            .hall("Grand Hall"),
        Record::with_id(
            "4",
            "Elena Smirnova",
            "Graduation night for students",
            at(2024, 11, 8, 16, 45),
        )
        .title("Graduation party")
        .photo_link("/images/avatar2.png")
        .date(at(2024, 12, 25, 16, 0))
        .guests(200)
        .event_type("graduation")
        .status(status::DRAFT)
        .hall("Grand Hall"),
        Record::with_id("5", "Andrey Volkov", "Annual industry conference", at(2024, 11, 5, 11, 20))
            .title("Business conference")
            .photo_link("/images/avatar1.png")
            .date(at(2024, 12, 18, 9, 0))
            .guests(150)
            .event_type("conference")
            .status(status::CONFIRMED)
            .hall("Business Center"),
        Record::with_id(
            "6",
            "Olga Novikova",
            "Kids party with entertainers",
            at(2024, 11, 20, 13, 10),
        )
        .title("Children's birthday")
        .photo_link("/images/avatar2.png")
        .date(at(2024, 12, 22, 15, 0))
        .guests(25)
        .event_type("kids")
        .status(status::PROCESSING)
        .hall("Family Room"),
        Record::with_id("7", "Dmitry Kozlov", "Private evening for two", at(2024, 11, 18, 20, 30))
            .title("Romantic dinner")
            .photo_link("/images/avatar1.png")
            .date(at(2024, 12, 14, 20, 0))
            .guests(2)
            .event_type("romantic")
            .status(status::CONFIRMED)
            .hall("VIP Room"),
        Record::with_id(
            "8",
            "Irina Fedorova",
            "Training seminar for entrepreneurs",
            at(2024, 11, 22, 8, 45),
        )
        .title("Marketing seminar")
        .photo_link("/images/avatar2.png")
        .date(at(2024, 12, 28, 10, 0))
        .guests(50)
        .event_type("seminar")
        .status(status::DRAFT)
        .hall("Conference Hall"),
        Record::with_id(
            "9",
            "Alexander Popov",
            "Professional photo session in the interiors",
            at(2024, 11, 25, 15, 20),
        )
        .title("Photo session")
        .photo_link("/images/avatar1.png")
        .date(at(2024, 12, 30, 14, 0))
        .guests(5)
        .event_type("photo")
        .status(status::CONFIRMED)
        .hall("Studio"),
        Record::with_id(
            "10",
            "Natalia Morozova",
            "Annual university alumni meeting",
            at(2024, 11, 28, 17, 35),
        )
        .title("Alumni reunion")
        .photo_link("/images/avatar2.png")
        .date(at(2024, 12, 29, 19, 0))
        .guests(100)
        .event_type("alumni")
        .status(status::PROCESSING)
        .hall("Grand Hall"),
    ]
}
