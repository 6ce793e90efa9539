use super::*;

#[test]
fn wrap_index_single_step() {
    assert_eq!(wrap_index(-1, 3), 2);
    assert_eq!(wrap_index(3, 3), 0);
    assert_eq!(wrap_index(1, 3), 1);
}

#[test]
fn wrap_index_far_out_of_range() {
    assert_eq!(wrap_index(-7, 3), 2);
    assert_eq!(wrap_index(10, 3), 1);
    assert_eq!(wrap_index(i64::MIN, 2), 0);
}

#[test]
fn thousands_grouping() {
    assert_eq!(group_thousands(0), "0");
    assert_eq!(group_thousands(999), "999");
    assert_eq!(group_thousands(1000), "1,000");
    assert_eq!(group_thousands(123_456), "123,456");
    assert_eq!(group_thousands(-1_234_567), "-1,234,567");
}
