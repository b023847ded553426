//! Destination lookup for the travel cost service.
//!
//! The cost service prices 12 countries. Model output names cities as often
//! as countries, in Korean or English, so each key carries a list of
//! lower-case aliases. Matching is substring containment on the lower-cased
//! place name; the first alias hit in table order wins.

/// A supported destination and the names that resolve to it
pub struct Destination {
    pub key: &'static str,
    pub aliases: &'static [&'static str],
}

pub static DESTINATIONS: &[Destination] = &[
    Destination {
        key: "일본",
        aliases: &[
            "일본", "도쿄", "동경", "오사카", "교토", "후쿠오카", "삿포로", "홋카이도", "오키나와",
            "나고야", "japan", "tokyo", "osaka", "kyoto", "fukuoka", "sapporo", "hokkaido",
            "okinawa", "nagoya",
        ],
    },
    Destination {
        key: "태국",
        aliases: &[
            "태국", "방콕", "푸켓", "치앙마이", "파타야", "크라비", "thailand", "bangkok", "phuket",
            "chiang mai", "pattaya", "krabi",
        ],
    },
    Destination {
        key: "베트남",
        aliases: &[
            "베트남", "하노이", "다낭", "호치민", "나트랑", "푸꾸옥", "호이안", "vietnam",
            "hanoi", "da nang", "danang", "ho chi minh", "nha trang", "phu quoc", "hoi an",
        ],
    },
    Destination {
        key: "싱가포르",
        aliases: &["싱가포르", "singapore"],
    },
    Destination {
        key: "말레이시아",
        aliases: &[
            "말레이시아", "쿠알라룸푸르", "코타키나발루", "페낭", "랑카위", "malaysia",
            "kuala lumpur", "kota kinabalu", "penang", "langkawi",
        ],
    },
    Destination {
        key: "필리핀",
        aliases: &[
            "필리핀", "세부", "보라카이", "마닐라", "팔라완", "보홀", "philippines", "cebu",
            "boracay", "manila", "palawan", "bohol",
        ],
    },
    Destination {
        key: "인도네시아",
        aliases: &[
            "인도네시아", "발리", "자카르타", "롬복", "indonesia", "bali", "jakarta", "lombok",
        ],
    },
    Destination {
        key: "프랑스",
        aliases: &[
            "프랑스", "파리", "니스", "리옹", "마르세유", "france", "paris", "lyon", "marseille",
        ],
    },
    Destination {
        key: "이탈리아",
        aliases: &[
            "이탈리아", "로마", "밀라노", "베네치아", "베니스", "피렌체", "나폴리", "italy", "rome",
            "milan", "venice", "florence", "naples",
        ],
    },
    Destination {
        key: "스페인",
        aliases: &[
            "스페인", "마드리드", "바르셀로나", "세비야", "그라나다", "spain", "madrid",
            "barcelona", "seville", "granada",
        ],
    },
    Destination {
        key: "미국",
        aliases: &[
            "미국", "뉴욕", "하와이", "호놀룰루", "로스앤젤레스", "샌프란시스코", "라스베이거스",
            "괌", "사이판", "united states", "america", "new york", "hawaii", "honolulu",
            "los angeles", "san francisco", "las vegas", "guam", "saipan",
        ],
    },
    Destination {
        key: "캐나다",
        aliases: &[
            "캐나다", "밴쿠버", "토론토", "몬트리올", "밴프", "퀘벡", "canada", "vancouver",
            "toronto", "montreal", "banff", "quebec",
        ],
    },
];

/// Resolves a place name to its canonical destination key
pub fn resolve_destination(place: &str) -> Option<&'static str> {
    let place = place.to_lowercase();
    if place.trim().is_empty() {
        return None;
    }

    DESTINATIONS
        .iter()
        .find(|destination| {
            destination
                .aliases
                .iter()
                .any(|alias| place.contains(alias))
        })
        .map(|destination| destination.key)
}
