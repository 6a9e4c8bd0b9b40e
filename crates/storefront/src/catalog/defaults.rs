//! The built-in product catalog shipped with each release.

use rust_decimal::Decimal;
use twist_taste_core::{Product, ProductId};

pub const CATEGORY_PASTRIES: &str = "معجنات";
pub const CATEGORY_SWEETS: &str = "حلويات";
pub const CATEGORY_SAVORY: &str = "موالح";

struct DefaultProduct {
    id: i64,
    name: &'static str,
    price: i64,
    description: &'static str,
    image: &'static str,
    category: &'static str,
}

const DEFAULT_PRODUCTS: &[DefaultProduct] = &[
    DefaultProduct {
        id: 1,
        name: "كرواسون الزبدة الفرنسي",
        price: 12,
        description: "كرواسون هش ومقرمش محضر بالزبدة الفرنسية الفاخرة، يخبز طازجاً كل صباح.",
        image: "https://images.unsplash.com/photo-1555507036-ab1f4038808a?q=80&w=800&auto=format&fit=crop",
        category: CATEGORY_PASTRIES,
    },
    DefaultProduct {
        id: 2,
        name: "سينابون القرفة الكلاسيكي",
        price: 15,
        description: "لفائف القرفة الطرية مع صوص الجبن الكريمي الغني والجوز المحمص.",
        image: "https://images.unsplash.com/photo-1509365465985-25d11c17e812?q=80&w=800&auto=format&fit=crop",
        category: CATEGORY_PASTRIES,
    },
    DefaultProduct {
        id: 3,
        name: "بوكس الدونات المشكل",
        price: 45,
        description: "6 قطع من الدونات الهشة بنكهات متنوعة (شوكولاتة، كراميل، زعتر، كاسترد).",
        image: "https://images.unsplash.com/photo-1527515545081-5db817172677?q=80&w=800&auto=format&fit=crop",
        category: CATEGORY_SWEETS,
    },
    DefaultProduct {
        id: 4,
        name: "كنافة نابلسية بالجبن",
        price: 25,
        description: "كنافة ذهبية مقرمشة محشوة بالجبن النابلسي الساخن والقطر الخفيف.",
        image: "https://images.unsplash.com/photo-1514516345957-556ca7d90a29?q=80&w=800&auto=format&fit=crop",
        category: CATEGORY_SWEETS,
    },
    DefaultProduct {
        id: 5,
        name: "بقلاوة فستق ملكية",
        price: 35,
        description: "طبقات رقيقة من العجين المقرمش محشوة بأجود أنواع الفستق الحلبي.",
        image: "https://images.unsplash.com/photo-1519676867240-f03562e64548?q=80&w=800&auto=format&fit=crop",
        category: CATEGORY_SWEETS,
    },
    DefaultProduct {
        id: 6,
        name: "ورق عنب حامض حلو",
        price: 30,
        description: "صحن ورق عنب مطهو ببطء مع دبس الرمان والليمون، طعم لا يقاوم.",
        image: "https://images.unsplash.com/photo-1606132194636-f33010f3c53a?q=80&w=800&auto=format&fit=crop",
        category: CATEGORY_SAVORY,
    },
    DefaultProduct {
        id: 7,
        name: "فطاير مشكلة (12 قطعة)",
        price: 40,
        description: "تشكيلة من الفطاير الطازجة (زعتر، جبن، سبانخ، لحم) بعجينة هشة.",
        image: "https://images.unsplash.com/photo-1599785209707-a456fc1337bb?q=80&w=800&auto=format&fit=crop",
        category: CATEGORY_PASTRIES,
    },
    DefaultProduct {
        id: 8,
        name: "تشيز كيك التوت الأزرق",
        price: 20,
        description: "طبقة غنية من الكريمة الناعمة على قاعدة من البسكويت المقرمش مع صوص التوت.",
        image: "https://images.unsplash.com/photo-1533134242443-d4fd215305ad?q=80&w=800&auto=format&fit=crop",
        category: CATEGORY_SWEETS,
    },
    DefaultProduct {
        id: 9,
        name: "بوكس حلا الشعيرية",
        price: 18,
        description: "حلا الشعيرية الباكستانية مع طبقات الكريمة والكراميل في عبوات أنيقة.",
        image: "https://images.unsplash.com/photo-1587314168485-3236d6710814?q=80&w=800&auto=format&fit=crop",
        category: CATEGORY_SWEETS,
    },
    DefaultProduct {
        id: 10,
        name: "ساندوتش كلوب منزلي",
        price: 22,
        description: "ساندوتشات ميني متنوعة محشوة بالدجاج والخضروات والأجبان الفاخرة.",
        image: "https://images.unsplash.com/photo-1528733385394-467f08834647?q=80&w=800&auto=format&fit=crop",
        category: CATEGORY_SAVORY,
    },
];

/// The default catalog, in display order.
#[must_use]
pub fn default_catalog() -> Vec<Product> {
    DEFAULT_PRODUCTS
        .iter()
        .map(|p| Product {
            id: ProductId::new(p.id),
            name: p.name.to_owned(),
            price: Decimal::from(p.price),
            description: p.description.to_owned(),
            image: p.image.to_owned(),
            category: p.category.to_owned(),
        })
        .collect()
}
