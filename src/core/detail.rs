use crate::domain::model::{DetailPanel, MarkedVenue};

// 目前後端沒有提供介紹文字，先用固定內容
const PLACEHOLDER_TITLE: &str = "Baku Military Monument";
const PLACEHOLDER_DESCRIPTION: &str = "The monument was designed by Turkish architects Hüseyin Bütüner and Hilmi Güner in the form of a two-story pyramidal frustum with square bases. Its truncated corners create an octagonal appearance. Covered in red granite, it features star and crescent figures made of pure white marble on each of the four main faces, resembling the Turkish national flag.";

const FALLBACK_IMAGES: [&str; 3] = [
    "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQWDXc0Mv2SUX7040DXR8ZEvOATkmASY6h8Cw&s",
    "https://www.tracesofwar.com/upload/0155110921172811.jpg",
    "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcR0mBKRdG3MhFUY7RVcyWk8cbipBC58AJ87BQ&s",
];

impl DetailPanel {
    pub fn for_venue(venue: &MarkedVenue) -> Self {
        let images = std::array::from_fn(|i| {
            venue.images[i]
                .clone()
                .unwrap_or_else(|| FALLBACK_IMAGES[i].to_string())
        });

        Self {
            title: PLACEHOLDER_TITLE.to_string(),
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            images,
            likes_and_comments: format!(
                "{} likes and {} comments",
                venue.num_likes, venue.num_comments
            ),
        }
    }
}
