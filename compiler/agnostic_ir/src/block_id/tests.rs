use super::*;

#[test]
fn test_root_is_zero() {
    assert_eq!(BlockId::ROOT.index(), 0);
    assert_eq!(BlockId::ROOT, BlockId::new(0));
}

#[test]
fn test_next_block_id() {
    assert_eq!(next_block_id(0), BlockId::ROOT);
    assert_eq!(next_block_id(7).raw(), 7);
}

#[test]
fn test_formatting() {
    assert_eq!(format!("{:?}", BlockId::new(3)), "BlockId(3)");
    assert_eq!(BlockId::new(3).to_string(), "#3");
}
