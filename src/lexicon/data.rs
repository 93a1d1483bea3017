// WHY: built-in vocabulary tables kept apart from the matching logic
// Terms are matched case-insensitively and whole-word, so casing here only matters for display

/// Complex word -> plain replacement
pub const WORD_SIMPLIFICATIONS: &[(&str, &str)] = &[
    ("utilize", "use"),
    ("utilizes", "uses"),
    ("utilized", "used"),
    ("utilizing", "using"),
    ("utilization", "use"),
    ("demonstrate", "show"),
    ("demonstrates", "shows"),
    ("demonstrated", "showed"),
    ("demonstrating", "showing"),
    ("implement", "do"),
    ("facilitate", "help"),
    ("facilitates", "helps"),
    ("facilitated", "helped"),
    ("facilitating", "helping"),
    ("approximately", "about"),
    ("subsequently", "then"),
    ("consequently", "so"),
    ("furthermore", "also"),
    ("however", "but"),
    ("therefore", "so"),
    ("nevertheless", "but"),
    ("predominantly", "mostly"),
    ("substantial", "large"),
    ("commence", "start"),
    ("commences", "starts"),
    ("commenced", "started"),
    ("initiate", "start"),
    ("initiates", "starts"),
    ("initiated", "started"),
    ("terminate", "end"),
    ("terminates", "ends"),
    ("terminated", "ended"),
    ("acquire", "get"),
    ("acquires", "gets"),
    ("acquired", "got"),
    ("sufficient", "enough"),
    ("eliminate", "remove"),
    ("eliminates", "removes"),
    ("eliminated", "removed"),
    ("construct", "build"),
    ("constructs", "builds"),
    ("constructed", "built"),
    ("purchase", "buy"),
    ("purchases", "buys"),
    ("purchased", "bought"),
    ("establish", "set up"),
    ("establishes", "sets up"),
    ("established", "set up"),
    ("maintain", "keep"),
    ("maintains", "keeps"),
    ("maintained", "kept"),
    ("indicate", "show"),
    ("indicates", "shows"),
    ("indicated", "showed"),
    ("require", "need"),
    ("requires", "needs"),
    ("required", "needed"),
    ("assist", "help"),
    ("assists", "helps"),
    ("assisted", "helped"),
    ("provide", "give"),
    ("provides", "gives"),
    ("obtain", "get"),
    ("obtains", "gets"),
    ("obtained", "got"),
    ("create", "make"),
    ("develop", "make"),
    ("produce", "make"),
    ("generate", "make"),
    ("determine", "decide"),
    ("determines", "decides"),
    ("identify", "find"),
    ("identifies", "finds"),
    ("identified", "found"),
    ("participate", "join"),
    ("participates", "joins"),
    ("communicate", "talk"),
    ("communicates", "talks"),
    ("collaborate", "work together"),
    ("accommodate", "fit"),
    ("anticipate", "expect"),
    ("anticipates", "expects"),
    ("anticipated", "expected"),
    ("comprehend", "understand"),
    ("comprehends", "understands"),
    ("significant", "important"),
    ("appropriate", "right"),
    ("individual", "person"),
    ("magnificent", "amazing"),
    ("tremendous", "huge"),
    ("exceptional", "great"),
    ("extraordinary", "amazing"),
    ("phenomenal", "remarkable"),
    ("sophisticated", "complex"),
];

/// Wordy phrase -> short form. Cosmetic: not counted as simplified words
pub const PHRASE_REPLACEMENTS: &[(&str, &str)] = &[
    ("in order to", "to"),
    ("for the purpose of", "to"),
    ("with regard to", "about"),
    ("in relation to", "about"),
    ("as a result of", "because of"),
    ("due to the fact that", "because"),
    ("it is important to note that", "note that"),
    ("please be advised that", "please know that"),
];

/// Jargon term -> plain-language definition
pub const JARGON_DEFINITIONS: &[(&str, &str)] = &[
    // Technology
    ("API", "Application Programming Interface - a way for different software programs to communicate with each other"),
    ("JavaScript", "A programming language that makes web pages interactive and dynamic"),
    ("HTML", "HyperText Markup Language - the basic building blocks of web pages"),
    ("CSS", "Cascading Style Sheets - what makes web pages look beautiful and organized"),
    ("URL", "Uniform Resource Locator - the web address of a page or file on the internet"),
    ("algorithm", "A set of step-by-step instructions to solve a problem or complete a task"),
    ("database", "An organized collection of information stored on a computer"),
    ("server", "A powerful computer that stores websites and delivers them to your device"),
    ("browser", "Software you use to view websites (like Chrome, Firefox, or Safari)"),
    ("debugging", "The process of finding and fixing problems in computer programs"),
    ("framework", "Pre-built tools that help developers create software faster"),
    ("encryption", "A security method that scrambles information to keep it private"),
    ("bandwidth", "The amount of data that can be sent over an internet connection"),
    ("cache", "A temporary storage area that keeps frequently used data for quick access"),
    ("firewall", "A security system that monitors and controls network traffic"),
    ("malware", "Malicious software designed to damage or break into computer systems"),
    ("protocol", "A set of rules that govern how data is sent and received over a network"),
    ("cloud computing", "Using internet-based services instead of your own computer"),
    ("artificial intelligence", "Computer systems that can perform tasks requiring human-like thinking"),
    ("machine learning", "A type of AI where computers learn patterns from data"),
    ("blockchain", "A secure digital ledger that records transactions"),
    ("cryptocurrency", "Digital money that uses encryption for security and works independently of banks"),
    // Science and research
    ("hypothesis", "An educated guess that can be tested through experiments"),
    ("methodology", "The systematic approach or method used to conduct research"),
    ("analysis", "The process of examining something carefully to understand it better"),
    ("synthesis", "Combining different ideas or elements to create something new"),
    ("correlation", "A relationship between two things that tend to occur together"),
    ("variable", "A factor that can change in an experiment or study"),
    ("peer review", "When experts check each other's work before it gets published"),
    ("empirical", "Based on observation and evidence rather than theory alone"),
    ("qualitative", "Research that focuses on qualities and characteristics rather than numbers"),
    ("quantitative", "Research that focuses on numbers and measurable data"),
    // Business and finance
    ("stakeholder", "Anyone who has an interest in or is affected by a business or project"),
    ("sustainability", "The ability to continue operating without harming the environment or society"),
    ("revenue", "The total amount of money a business receives from sales"),
    ("expenditure", "Money spent or paid out by a person or organization"),
    ("optimization", "Making something work as effectively and efficiently as possible"),
    ("implementation", "The process of putting a plan or decision into action"),
    ("infrastructure", "The basic systems and structures needed for something to operate"),
    ("scalability", "The ability to grow or expand successfully"),
    ("ROI", "Return on Investment - how much profit you make compared to what you spent"),
    ("KPI", "Key Performance Indicator - important measurements of success"),
    ("B2B", "Business to Business - companies that sell to other companies"),
    ("B2C", "Business to Consumer - companies that sell directly to customers"),
    // Medical and health
    ("diagnosis", "Identifying what illness or condition someone has"),
    ("prognosis", "A prediction of how a medical condition will develop"),
    ("chronic", "A long-term or recurring medical condition"),
    ("acute", "Sudden onset or short-term medical condition"),
    ("symptoms", "Physical or mental signs that indicate an illness or condition"),
    ("treatment", "Medical care given to help cure or manage an illness"),
    ("prevention", "Actions taken to stop something from happening"),
    ("immunity", "The body's ability to resist or fight off infections"),
    ("metabolism", "The process by which your body converts food into energy"),
    ("cardiovascular", "Related to the heart and blood vessels"),
];

/// Function words excluded from term-frequency scoring
pub const STOP_WORDS: &[&str] = &[
    "the", "is", "in", "at", "which", "on", "and", "a", "an", "of", "for", "to",
    "with", "that", "this", "it", "as", "are", "by", "from", "or", "be", "we",
    "you", "can", "will", "has", "have", "but", "not", "do", "if", "they", "he",
    "she", "was", "been", "their", "said", "each", "would", "there", "up", "out",
    "many", "time", "very", "when", "much", "new", "who", "most",
];

/// Conjunctions that mark a natural break inside a long sentence
pub const BREAK_CONJUNCTIONS: &[&str] = &[
    "and", "but", "or", "so", "yet", "because", "since", "although", "while",
    "if", "when", "where", "after", "before",
];

/// Label used when a matched jargon term has no definition entry
pub const FALLBACK_DEFINITION: &str = "Technical term";
