// Static content: spirit partners, avatar styles, inspiration prompts,
// the next-steps checklist, and the community seed sparks.

/// Profile stats, each on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct UserStats {
    pub creativity: u8,
    pub vision: u8,
    pub execution: u8,
}

/// Archetype picked at sign-up; seeds the user's stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiritPartner {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub stats: UserStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarStyle {
    pub id: &'static str,
    pub name: &'static str,
}

/// A community spark shipped with the app.
#[derive(Debug, Clone, Copy)]
pub struct SeedSpark {
    pub id: &'static str,
    pub author: &'static str,
    pub concept: &'static str,
    pub full_description: &'static str,
    pub tags: &'static [&'static str],
    pub likes: u32,
}

const fn stats(creativity: u8, vision: u8, execution: u8) -> UserStats {
    UserStats {
        creativity,
        vision,
        execution,
    }
}

pub const SPIRIT_PARTNERS: &[SpiritPartner] = &[
    SpiritPartner {
        id: "ant",
        label: "Formiga",
        description: "Trabalho de formiguinha. Construção sólida, passo a passo.",
        stats: stats(60, 70, 99),
    },
    SpiritPartner {
        id: "dog",
        label: "Cachorro",
        description: "Lealdade e Conexão. O amigo que une a matilha.",
        stats: stats(75, 60, 90),
    },
    SpiritPartner {
        id: "cat",
        label: "Gato",
        description: "Inteligência independente. Curioso e ágil.",
        stats: stats(95, 80, 60),
    },
    SpiritPartner {
        id: "eagle",
        label: "Águia",
        description: "Visão de longo alcance. Vê oportunidades onde ninguém vê.",
        stats: stats(85, 99, 70),
    },
    SpiritPartner {
        id: "rabbit",
        label: "Coelho",
        description: "Velocidade pura. Salto de fé e execução rápida.",
        stats: stats(80, 60, 95),
    },
    SpiritPartner {
        id: "owl",
        label: "Coruja",
        description: "Sabedoria estratégica. Analisa tudo antes de agir.",
        stats: stats(90, 95, 50),
    },
    SpiritPartner {
        id: "lion",
        label: "Leão",
        description: "Liderança natural. Coragem para guiar o bando.",
        stats: stats(70, 90, 90),
    },
];

pub const AVATAR_STYLES: &[AvatarStyle] = &[
    AvatarStyle { id: "avataaars", name: "Cartoon" },
    AvatarStyle { id: "notionists", name: "Minimal" },
    AvatarStyle { id: "bottts", name: "Robô" },
    AvatarStyle { id: "lorelei", name: "Artístico" },
];

/// Rotating placeholders for the idea input.
pub const INSPIRATION_PROMPTS: &[&str] = &[
    "Rede social para idosos ensinarem a Geração Z...",
    "App para encontrar companhia para shows...",
    "Roupas que crescem junto com a criança...",
    "Marketplace de sobras de material de construção...",
    "Uber para passear com idosos...",
];

/// Items of the action checklist shown under a result.
pub const NEXT_STEPS: &[&str] = &[
    "Pitch Deck",
    "MVP (Produto Mínimo)",
    "Personas",
    "Jornada do Usuário",
    "Nome Definitivo",
    "Tela Inicial do App",
    "Roadmap 90 dias",
    "Estratégia Viral",
];

pub const SEED_SPARKS: &[SeedSpark] = &[
    SeedSpark {
        id: "1",
        author: "Cassiano",
        concept: "Ajuda Rápida: Uber dos reparos domésticos de 5–20 min.",
        full_description: "Profissionais próximos aceitam tarefas rápidas (trocar lâmpada, ajustar porta) imediatamente. Preço fixo e claro.",
        tags: &["Serviços", "On-Demand", "Casa"],
        likes: 342,
    },
    SeedSpark {
        id: "2",
        author: "Graziele",
        concept: "Troca de Cuidados de Pets — Pet Sitting P2P baseado em créditos.",
        full_description: "Rede de vizinhos cuidando dos pets uns dos outros. Você cuida 1 noite -> ganha crédito para usar depois. Sem dinheiro envolvido.",
        tags: &["Pets", "Colaborativo", "Comunidade"],
        likes: 215,
    },
    SeedSpark {
        id: "3",
        author: "Laura",
        concept: "Pais Revezam: Ajuda entre pais do bairro para folgas de 1-2h.",
        full_description: "Rede local de pais que trocam ajuda entre si para resolver coisas rápidas. Você cuida 1 hora -> ganha crédito.",
        tags: &["Família", "Social", "Rede de Apoio"],
        likes: 567,
    },
    SeedSpark {
        id: "4",
        author: "Sinval e Giovani",
        concept: "Microajudas de Bairro: A plataforma de favores reais.",
        full_description: "Plataforma para ajudas hiperlocais: segurar escada, acompanhar no hospital, levar um item. Recompensas simbólicas.",
        tags: &["Hiperlocal", "Social", "Conexão"],
        likes: 189,
    },
    SeedSpark {
        id: "5",
        author: "Grupo Plano B",
        concept: "Incubadora de \"Side Hustles\": Valide seu Plano B sem pedir demissão.",
        full_description: "Uma aceleradora focada exclusivamente em projetos noturnos e de fim de semana. Teste sua ideia de negócio em 30 dias antes de largar a segurança da CLT.",
        tags: &["Carreira", "Segurança", "Transição"],
        likes: 412,
    },
];

/// Look up a spirit partner by id.
pub fn spirit_partner(id: &str) -> Option<&'static SpiritPartner> {
    SPIRIT_PARTNERS.iter().find(|p| p.id == id)
}

/// Inspiration prompt for the given rotation tick.
pub fn inspiration_prompt(tick: usize) -> &'static str {
    INSPIRATION_PROMPTS[tick % INSPIRATION_PROMPTS.len()]
}
