pub const CATEGORIES: [&str; 5] = ["Điện tử", "Thời trang", "Đồ gia dụng", "Sách", "Thực phẩm"];

pub fn is_valid_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}
