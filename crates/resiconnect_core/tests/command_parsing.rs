use resiconnect_core::command::person::ADD_STUDENT_USAGE;
use resiconnect_core::model::fields::StudentDesignation;
use resiconnect_core::parser::syntax::{PREFIX_NAME, PREFIX_PHONE};
use resiconnect_core::{parse_command, Command, ParseError};

const JOHN: &str = "addstudent name/John Doe matric/A1234567B phone/98765432 \
email/john@u.edu a/21 Lower Kent Ridge block/A level/4 room/01 designation/0";

#[test]
fn add_student_keeps_exact_field_values() {
    let Command::AddStudent(student) = parse_command(JOHN).unwrap() else {
        panic!("expected add student command");
    };
    assert_eq!(student.person.name().as_str(), "John Doe");
    assert_eq!(student.matric.as_str(), "A1234567B");
    assert_eq!(student.person.phone().as_str(), "98765432");
    assert_eq!(student.person.email().as_str(), "john@u.edu");
    assert_eq!(student.person.address().as_str(), "21 Lower Kent Ridge");
    assert_eq!(student.block.as_str(), "A");
    assert_eq!(student.level.as_str(), "4");
    assert_eq!(student.room.as_str(), "01");
    assert_eq!(student.designation, StudentDesignation::Resident);
    assert!(student.emergency.is_none());
    assert!(student.person.tags().is_empty());
}

#[test]
fn missing_matric_reports_add_student_usage() {
    let err = parse_command("addstudent name/John phone/98765432").unwrap_err();
    assert_eq!(err, ParseError::InvalidFormat(ADD_STUDENT_USAGE));
    assert_eq!(
        err.to_string(),
        format!("Invalid command format! \n{ADD_STUDENT_USAGE}")
    );
}

#[test]
fn repeated_name_is_reported_once() {
    let err = parse_command("addstudent name/Alice name/Bob phone/999").unwrap_err();
    assert_eq!(err, ParseError::DuplicatePrefixes(vec![PREFIX_NAME]));
    assert_eq!(
        err.to_string(),
        "Multiple values specified for the following single-valued field(s): name/"
    );
}

#[test]
fn duplicates_are_checked_before_field_values() {
    let err = parse_command(
        "addstaff name/Mary Tan phone/abc phone/def email/mary@u.edu a/Office designation/1",
    )
    .unwrap_err();
    assert_eq!(err, ParseError::DuplicatePrefixes(vec![PREFIX_PHONE]));
}

#[test]
fn first_invalid_field_wins() {
    let err = parse_command(
        "addstudent name/John Doe matric/B1234567B phone/12 email/john@u.edu \
         a/Kent Ridge block/A level/4 room/01 designation/0",
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Matric numbers should start with 'A', followed by 7 digits and end with an uppercase letter"
    );
}

#[test]
fn designation_outside_table_is_rejected() {
    let input = JOHN.replace("designation/0", "designation/3");
    let err = parse_command(&input).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Designation should only be an integer from 0 to 2, and it should not be blank"
    );
}

#[test]
fn tags_and_emergency_are_optional_extras() {
    let input = format!("{JOHN} emergency/61234567 t/floor t/music t/floor");
    let Command::AddStudent(student) = parse_command(&input).unwrap() else {
        panic!("expected add student command");
    };
    assert_eq!(
        student.emergency.as_ref().map(|phone| phone.as_str()),
        Some("61234567")
    );
    let tags: Vec<_> = student.person.tags().iter().map(|tag| tag.as_str()).collect();
    assert_eq!(tags, vec!["floor", "music"]);
}

#[test]
fn delete_requires_positive_index() {
    assert!(matches!(
        parse_command("deletestudent 0"),
        Err(ParseError::InvalidFormat(_))
    ));
    assert!(matches!(
        parse_command("deletestaff abc"),
        Err(ParseError::InvalidFormat(_))
    ));
    assert!(matches!(parse_command("deleteexternalparty 2"), Ok(Command::DeleteExternalParty(_))));
}

#[test]
fn search_without_attributes_is_invalid_format() {
    assert!(matches!(
        parse_command("searchstudent"),
        Err(ParseError::InvalidFormat(_))
    ));
    assert!(matches!(
        parse_command("searchstaff name/mary"),
        Ok(Command::SearchStaff(_))
    ));
}
