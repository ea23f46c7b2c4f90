//! Static storefront content: services and legal pages.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Section {
    pub heading: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LegalPage {
    pub slug: &'static str,
    pub title: &'static str,
    pub sections: &'static [Section],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Service {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const SERVICES: &[Service] = &[
    Service {
        key: "maintenance",
        title: "Servicing & maintenance",
        description: "Scheduled servicing for every brand, carried out by certified technicians.",
    },
    Service {
        key: "repair",
        title: "Mechanical repair",
        description: "Diagnostics, engine work, electrics and brake overhauls.",
    },
    Service {
        key: "tyres",
        title: "Tyres",
        description: "Tyre supply, fitting and balancing while you wait.",
    },
    Service {
        key: "financing",
        title: "Financing",
        description: "Loan and lease offers on new and used motorcycles.",
    },
    Service {
        key: "trade_in",
        title: "Trade-in",
        description: "Free valuation of your current motorcycle against a purchase.",
    },
    Service {
        key: "test_ride",
        title: "Test rides",
        description: "Book a test ride on any available demo motorcycle.",
    },
];

pub const LEGAL_PAGES: &[LegalPage] = &[
    LegalPage {
        slug: "legal-notice",
        title: "Legal notice",
        sections: &[
            Section {
                heading: "Publisher",
                body: "This website is published by the dealership named on the contact page, \
                       registered with the local trade register.",
            },
            Section {
                heading: "Hosting",
                body: "The website and its data are hosted by third-party cloud providers \
                       located in the European Union.",
            },
            Section {
                heading: "Intellectual property",
                body: "All text, photographs and logos on this website are protected. \
                       Manufacturer trademarks belong to their respective owners.",
            },
        ],
    },
    LegalPage {
        slug: "privacy-policy",
        title: "Privacy policy",
        sections: &[
            Section {
                heading: "Data collected",
                body: "When you use the contact or order forms we collect your name, email \
                       address, phone number and message.",
            },
            Section {
                heading: "Purpose",
                body: "Your data is used only to answer your request and follow up on your \
                       purchase. It is never sold to third parties.",
            },
            Section {
                heading: "Retention",
                body: "Contact requests are kept for up to three years after the last exchange.",
            },
            Section {
                heading: "Your rights",
                body: "You may request access, correction or deletion of your data at any time \
                       by writing to the address on the contact page.",
            },
        ],
    },
    LegalPage {
        slug: "terms-of-sale",
        title: "Terms of sale",
        sections: &[
            Section {
                heading: "Orders",
                body: "Orders placed on this website are requests. A sale is final once the \
                       dealership has confirmed availability and received payment in store.",
            },
            Section {
                heading: "Prices",
                body: "Prices are shown in euros including VAT. Vehicle prices exclude \
                       registration fees.",
            },
            Section {
                heading: "Returns",
                body: "Unused gear may be returned within 14 days in its original packaging.",
            },
        ],
    },
];

/// Look up a legal page by its slug.
pub fn legal_page(slug: &str) -> Option<&'static LegalPage> {
    LEGAL_PAGES.iter().find(|p| p.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_legal_pages_with_unique_slugs() {
        assert_eq!(LEGAL_PAGES.len(), 3);
        let mut slugs: Vec<_> = LEGAL_PAGES.iter().map(|p| p.slug).collect();
        slugs.dedup();
        assert_eq!(slugs.len(), 3);
    }

    #[test]
    fn legal_page_lookup() {
        assert_eq!(legal_page("privacy-policy").unwrap().title, "Privacy policy");
        assert!(legal_page("cookies").is_none());
    }

    #[test]
    fn every_page_has_content() {
        for page in LEGAL_PAGES {
            assert!(!page.sections.is_empty(), "{} has no sections", page.slug);
        }
        assert!(!SERVICES.is_empty());
    }
}
