//! Bundled seed offerings.

use super::CatalogSeed;
use crate::domain::{Decimal, Ipo, IpoId, IpoWindow, PriceBand, RiskLevel, Symbol};
use crate::engine::listing;
use chrono::NaiveDate;

struct Offering {
    id: &'static str,
    symbol: &'static str,
    name: &'static str,
    sector: &'static str,
    band: (u32, u32),
    lot_size: u32,
    issue_size: &'static str,
    risk: RiskLevel,
    description: &'static str,
}

impl Offering {
    fn into_ipo(self, window: IpoWindow) -> Ipo {
        let low = Decimal::from(self.band.0);
        let issue_price = Decimal::from(self.band.1);
        Ipo {
            id: IpoId::new(self.id),
            symbol: Symbol::new(self.symbol),
            name: self.name.to_string(),
            sector: self.sector.to_string(),
            price_band: PriceBand {
                low,
                high: issue_price,
            },
            issue_price,
            lot_size: self.lot_size,
            min_investment: issue_price * Decimal::from(self.lot_size),
            issue_size: self.issue_size.to_string(),
            risk_level: self.risk,
            description: self.description.to_string(),
            window,
            listing: None,
        }
    }
}

/// Placeholder for windows that initialization overwrites.
fn placeholder_window() -> IpoWindow {
    IpoWindow::starting(NaiveDate::default())
}

fn historical(offering: Offering, open: (i32, u32, u32), listed_at: u32) -> Ipo {
    let open_date = NaiveDate::from_ymd_opt(open.0, open.1, open.2).unwrap_or_default();
    let mut ipo = offering.into_ipo(IpoWindow::starting(open_date));
    let outcome = listing::outcome_at(ipo.issue_price, Decimal::from(listed_at));
    ipo.settle_listing(outcome);
    ipo
}

pub fn builtin_seed() -> CatalogSeed {
    CatalogSeed {
        open: open_offerings()
            .into_iter()
            .map(|o| o.into_ipo(placeholder_window()))
            .collect(),
        upcoming: upcoming_offerings()
            .into_iter()
            .map(|o| o.into_ipo(placeholder_window()))
            .collect(),
        closed: closed_offerings(),
    }
}

fn open_offerings() -> Vec<Offering> {
    vec![
        Offering {
            id: "IPO-001",
            symbol: "ZENTECH",
            name: "Zenith Technologies Ltd",
            sector: "Technology",
            band: (256, 270),
            lot_size: 55,
            issue_size: "₹1,200 Cr",
            risk: RiskLevel::Medium,
            description: "Cloud infrastructure and managed services for mid-size enterprises.",
        },
        Offering {
            id: "IPO-002",
            symbol: "GREENPWR",
            name: "Green Power Renewables Ltd",
            sector: "Renewable Energy",
            band: (95, 100),
            lot_size: 150,
            issue_size: "₹2,750 Cr",
            risk: RiskLevel::High,
            description: "Utility-scale solar and wind developer with a 4 GW pipeline.",
        },
        Offering {
            id: "IPO-003",
            symbol: "MEDICARE",
            name: "MediCare Hospitals Ltd",
            sector: "Healthcare",
            band: (410, 432),
            lot_size: 34,
            issue_size: "₹850 Cr",
            risk: RiskLevel::Low,
            description: "Multi-speciality hospital chain across tier-2 cities.",
        },
        Offering {
            id: "IPO-004",
            symbol: "SWIFTLOG",
            name: "Swift Logistics Ltd",
            sector: "Logistics",
            band: (180, 190),
            lot_size: 78,
            issue_size: "₹640 Cr",
            risk: RiskLevel::Medium,
            description: "Express parcel and warehousing network for e-commerce sellers.",
        },
    ]
}

fn upcoming_offerings() -> Vec<Offering> {
    vec![
        Offering {
            id: "IPO-101",
            symbol: "FINEDGE",
            name: "FinEdge Capital Ltd",
            sector: "Financial Services",
            band: (320, 336),
            lot_size: 44,
            issue_size: "₹1,500 Cr",
            risk: RiskLevel::Medium,
            description: "Digital lending platform for small merchants.",
        },
        Offering {
            id: "IPO-102",
            symbol: "AGRIFRESH",
            name: "AgriFresh Foods Ltd",
            sector: "Consumer Goods",
            band: (140, 148),
            lot_size: 101,
            issue_size: "₹420 Cr",
            risk: RiskLevel::Low,
            description: "Packaged staples and cold-chain distribution.",
        },
        Offering {
            id: "IPO-103",
            symbol: "QUANTUMAI",
            name: "Quantum AI Systems Ltd",
            sector: "Technology",
            band: (610, 642),
            lot_size: 23,
            issue_size: "₹980 Cr",
            risk: RiskLevel::High,
            description: "Computer-vision software for manufacturing quality control.",
        },
        Offering {
            id: "IPO-104",
            symbol: "BHARATINF",
            name: "Bharat Infra Projects Ltd",
            sector: "Infrastructure",
            band: (72, 76),
            lot_size: 197,
            issue_size: "₹3,100 Cr",
            risk: RiskLevel::Medium,
            description: "Highway and metro rail EPC contractor.",
        },
        Offering {
            id: "IPO-105",
            symbol: "PUREPHARMA",
            name: "PurePharma Labs Ltd",
            sector: "Healthcare",
            band: (505, 531),
            lot_size: 28,
            issue_size: "₹760 Cr",
            risk: RiskLevel::Low,
            description: "Generic formulations exporter with USFDA-approved plants.",
        },
        Offering {
            id: "IPO-106",
            symbol: "SOLARIS",
            name: "Solaris Modules Ltd",
            sector: "Renewable Energy",
            band: (218, 229),
            lot_size: 65,
            issue_size: "₹1,850 Cr",
            risk: RiskLevel::High,
            description: "Photovoltaic cell and module manufacturer.",
        },
        Offering {
            id: "IPO-107",
            symbol: "URBANNEST",
            name: "UrbanNest Realty Ltd",
            sector: "Real Estate",
            band: (390, 410),
            lot_size: 36,
            issue_size: "₹1,100 Cr",
            risk: RiskLevel::High,
            description: "Residential developer focused on affordable housing.",
        },
        Offering {
            id: "IPO-108",
            symbol: "CHEMCORE",
            name: "ChemCore Specialities Ltd",
            sector: "Specialty Chemicals",
            band: (665, 700),
            lot_size: 21,
            issue_size: "₹540 Cr",
            risk: RiskLevel::Medium,
            description: "Agro and pharma intermediates for export markets.",
        },
        Offering {
            id: "IPO-109",
            symbol: "EDUSPARK",
            name: "EduSpark Learning Ltd",
            sector: "Education",
            band: (114, 120),
            lot_size: 125,
            issue_size: "₹360 Cr",
            risk: RiskLevel::Medium,
            description: "Test-preparation and K-12 content platform.",
        },
        Offering {
            id: "IPO-110",
            symbol: "AQUAPURE",
            name: "AquaPure Water Solutions Ltd",
            sector: "Infrastructure",
            band: (265, 279),
            lot_size: 53,
            issue_size: "₹690 Cr",
            risk: RiskLevel::Low,
            description: "Municipal water treatment and desalination plants.",
        },
    ]
}

fn closed_offerings() -> Vec<Ipo> {
    vec![
        historical(
            Offering {
                id: "IPO-901",
                symbol: "TATAEV",
                name: "Tata Motive EV Ltd",
                sector: "Automobile",
                band: (475, 500),
                lot_size: 30,
                issue_size: "₹3,000 Cr",
                risk: RiskLevel::Medium,
                description: "Electric two- and three-wheeler manufacturer.",
            },
            (2024, 3, 4),
            612,
        ),
        historical(
            Offering {
                id: "IPO-902",
                symbol: "NOVABANK",
                name: "Nova Small Finance Bank Ltd",
                sector: "Financial Services",
                band: (57, 60),
                lot_size: 250,
                issue_size: "₹900 Cr",
                risk: RiskLevel::Low,
                description: "Microfinance-led small finance bank.",
            },
            (2024, 2, 12),
            66,
        ),
        historical(
            Offering {
                id: "IPO-903",
                symbol: "SKYJET",
                name: "SkyJet Aviation Services Ltd",
                sector: "Aviation",
                band: (304, 320),
                lot_size: 46,
                issue_size: "₹1,300 Cr",
                risk: RiskLevel::High,
                description: "Ground handling and MRO services.",
            },
            (2024, 1, 22),
            291,
        ),
        historical(
            Offering {
                id: "IPO-904",
                symbol: "DIGIPAY",
                name: "DigiPay Networks Ltd",
                sector: "Technology",
                band: (152, 160),
                lot_size: 93,
                issue_size: "₹1,750 Cr",
                risk: RiskLevel::Medium,
                description: "Payment gateway and POS terminals.",
            },
            (2023, 12, 11),
            198,
        ),
        historical(
            Offering {
                id: "IPO-905",
                symbol: "HIMALAYAN",
                name: "Himalayan Organics Ltd",
                sector: "Consumer Goods",
                band: (92, 97),
                lot_size: 154,
                issue_size: "₹310 Cr",
                risk: RiskLevel::Low,
                description: "Organic tea and spices exporter.",
            },
            (2023, 11, 20),
            104,
        ),
        historical(
            Offering {
                id: "IPO-906",
                symbol: "STEELWAY",
                name: "SteelWay Alloys Ltd",
                sector: "Metals",
                band: (228, 240),
                lot_size: 62,
                issue_size: "₹1,050 Cr",
                risk: RiskLevel::High,
                description: "Specialty steel and alloy castings.",
            },
            (2023, 10, 30),
            222,
        ),
        historical(
            Offering {
                id: "IPO-907",
                symbol: "CAREPLUS",
                name: "CarePlus Diagnostics Ltd",
                sector: "Healthcare",
                band: (551, 580),
                lot_size: 25,
                issue_size: "₹670 Cr",
                risk: RiskLevel::Low,
                description: "Pathology lab chain with home collection.",
            },
            (2023, 9, 18),
            655,
        ),
        historical(
            Offering {
                id: "IPO-908",
                symbol: "PORTLINK",
                name: "PortLink Terminals Ltd",
                sector: "Logistics",
                band: (133, 140),
                lot_size: 107,
                issue_size: "₹2,200 Cr",
                risk: RiskLevel::Medium,
                description: "Container freight stations on the west coast.",
            },
            (2023, 8, 7),
            152,
        ),
        historical(
            Offering {
                id: "IPO-909",
                symbol: "BRIGHTHOME",
                name: "BrightHome Appliances Ltd",
                sector: "Consumer Durables",
                band: (342, 360),
                lot_size: 41,
                issue_size: "₹820 Cr",
                risk: RiskLevel::Medium,
                description: "Kitchen appliances and water purifiers.",
            },
            (2023, 7, 10),
            389,
        ),
        historical(
            Offering {
                id: "IPO-910",
                symbol: "CODEFORGE",
                name: "CodeForge Software Ltd",
                sector: "Technology",
                band: (665, 700),
                lot_size: 21,
                issue_size: "₹1,400 Cr",
                risk: RiskLevel::High,
                description: "Low-code application platform for banks.",
            },
            (2023, 6, 12),
            812,
        ),
    ]
}
